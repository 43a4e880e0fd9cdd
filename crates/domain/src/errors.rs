use crate::wire::WireError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("wire format error: {0}")]
    Wire(#[from] WireError),

    #[error("invalid record data: {0}")]
    InvalidRecordData(String),

    #[error("invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("invalid record class: {0}")]
    InvalidRecordClass(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("cache error: {0}")]
    CacheError(String),

    #[error("metrics store error: {0}")]
    MetricsError(String),

    #[error("zone not found: {0}")]
    ZoneNotFound(i64),

    #[error("zone already exists: {0}")]
    ZoneAlreadyExists(String),

    #[error("record not found: {0}")]
    RecordNotFound(i64),

    #[error("record already exists for this zone, name, type, class and data")]
    DuplicateRecord,

    #[error("lookup deadline exceeded")]
    LookupTimeout,

    #[error("configuration error: {0}")]
    ConfigError(String),
}
