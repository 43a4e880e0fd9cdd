use chrono::{DateTime, Utc};
use cobalt_dns_domain::StoredRecord;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct RecordPayload {
    pub name: String,
    pub record_type: String,
    #[serde(default = "default_class")]
    pub class: String,
    pub ttl: u32,
    pub rdata: String,
}

fn default_class() -> String {
    "IN".to_string()
}

#[derive(Serialize, Debug)]
pub struct RecordDto {
    pub id: i64,
    pub zone_id: i64,
    pub name: String,
    pub record_type: String,
    pub class: String,
    pub ttl: u32,
    pub rdata: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredRecord> for RecordDto {
    fn from(record: StoredRecord) -> Self {
        Self {
            id: record.id,
            zone_id: record.zone_id,
            name: record.name,
            record_type: record.record_type.to_string(),
            class: record.class.to_string(),
            ttl: record.ttl,
            rdata: record.rdata,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
