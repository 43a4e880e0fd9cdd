use async_trait::async_trait;
use cobalt_dns_domain::{DomainError, RecordClass, RecordDraft, RecordType, StoredRecord, Zone};

/// Result of a hot-path lookup. A missing record is not an error; the
/// cache layer reports where the answer came from.
#[derive(Debug, Clone)]
pub struct RecordLookup {
    pub record: Option<StoredRecord>,
    pub cache_hit: bool,
}

impl RecordLookup {
    pub fn miss(record: Option<StoredRecord>) -> Self {
        Self {
            record,
            cache_hit: false,
        }
    }

    pub fn hit(record: StoredRecord) -> Self {
        Self {
            record: Some(record),
            cache_hit: true,
        }
    }
}

/// The record store capability set. The persistent adapter implements
/// it directly; the cache layer implements the same trait and wraps the
/// persistent variant.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the unique matching record of a non-deleted zone, or
    /// `None` if no row exists. Case-insensitive on `name`.
    async fn lookup_record(
        &self,
        name: &str,
        rtype: RecordType,
        class: RecordClass,
    ) -> Result<RecordLookup, DomainError>;

    async fn create_zone(&self, owner: &str, name: &str) -> Result<Zone, DomainError>;
    async fn get_zone(&self, id: i64) -> Result<Option<Zone>, DomainError>;
    async fn list_zones(&self, owner: Option<&str>) -> Result<Vec<Zone>, DomainError>;
    /// Tombstones the zone; its records stay in place but stop
    /// resolving.
    async fn delete_zone(&self, id: i64) -> Result<(), DomainError>;

    async fn list_records(&self, zone_id: i64) -> Result<Vec<StoredRecord>, DomainError>;
    async fn get_record(&self, id: i64) -> Result<Option<StoredRecord>, DomainError>;
    async fn create_record(&self, draft: &RecordDraft) -> Result<StoredRecord, DomainError>;
    async fn update_record(
        &self,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<StoredRecord, DomainError>;
    async fn delete_record(&self, id: i64) -> Result<(), DomainError>;
}
