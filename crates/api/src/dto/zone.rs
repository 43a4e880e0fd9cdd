use super::record::RecordDto;
use chrono::{DateTime, Utc};
use cobalt_dns_domain::{StoredRecord, Zone};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct CreateZoneRequest {
    pub owner: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListZonesQuery {
    pub owner: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ZoneDto {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Zone> for ZoneDto {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id,
            owner: zone.owner,
            name: zone.name,
            created_at: zone.created_at,
            updated_at: zone.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ZoneDetailDto {
    #[serde(flatten)]
    pub zone: ZoneDto,
    pub records: Vec<RecordDto>,
}

impl ZoneDetailDto {
    pub fn new(zone: Zone, records: Vec<StoredRecord>) -> Self {
        Self {
            zone: zone.into(),
            records: records.into_iter().map(RecordDto::from).collect(),
        }
    }
}
