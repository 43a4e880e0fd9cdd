use crate::errors::DomainError;
use crate::record_class::RecordClass;
use crate::record_data;
use crate::record_type::RecordType;
use crate::wire::ResourceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record as the persistent store and the cache carry it: the name is
/// the fully-qualified label sequence without a trailing dot, the RData
/// is text. This is also the shape serialized into cache entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub zone_id: i64,
    pub name: String,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Converts to a wire-ready resource record, translating the text
    /// RData into octets.
    pub fn to_wire(&self) -> Result<ResourceRecord, DomainError> {
        Ok(ResourceRecord {
            name: self.name.clone(),
            rtype: self.record_type,
            class: self.class,
            ttl: self.ttl,
            rdata: record_data::encode_rdata(self.record_type, &self.rdata)?,
        })
    }
}

/// Fields of a record create or update, before the store assigns an id
/// and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub zone_id: i64,
    pub name: String,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: String,
}
