use async_trait::async_trait;
use cobalt_dns_application::ports::{RecordCache, RecordLookup, RecordStore};
use cobalt_dns_domain::{DomainError, RecordClass, RecordDraft, RecordType, StoredRecord, Zone};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Floor applied when a record carries no TTL of its own.
const MIN_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache-through decorator over the persistent store.
///
/// Reads probe the cache first and backfill on miss; negative results
/// are never cached. Writes go through to the store and then refresh or
/// invalidate the affected key. Cache failures of any kind degrade to
/// the store path; they never fail a query.
pub struct CachedRecordStore {
    inner: Arc<dyn RecordStore>,
    cache: Arc<dyn RecordCache>,
}

impl CachedRecordStore {
    pub fn new(inner: Arc<dyn RecordStore>, cache: Arc<dyn RecordCache>) -> Self {
        Self { inner, cache }
    }

    fn cache_key(name: &str, rtype: RecordType, class: RecordClass) -> String {
        format!("{}|{}|{}", name, rtype.to_u16(), class.to_u16())
    }

    fn record_key(record: &StoredRecord) -> String {
        Self::cache_key(
            &record.name.to_lowercase(),
            record.record_type,
            record.class,
        )
    }

    fn cache_ttl(record_ttl: u32) -> Duration {
        if record_ttl == 0 {
            MIN_CACHE_TTL
        } else {
            Duration::from_secs(u64::from(record_ttl))
        }
    }

    async fn store_entry(&self, record: &StoredRecord) {
        let key = Self::record_key(record);
        let bytes = match serde_json::to_vec(record) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, key, "failed to serialize record for caching");
                return;
            }
        };
        if let Err(e) = self
            .cache
            .set(&key, &bytes, Self::cache_ttl(record.ttl))
            .await
        {
            warn!(error = %e, key, "cache write failed");
        }
    }

    async fn invalidate(&self, record: &StoredRecord) {
        let key = Self::record_key(record);
        if let Err(e) = self.cache.del(&key).await {
            warn!(error = %e, key, "cache invalidation failed");
        }
    }
}

#[async_trait]
impl RecordStore for CachedRecordStore {
    async fn lookup_record(
        &self,
        name: &str,
        rtype: RecordType,
        class: RecordClass,
    ) -> Result<RecordLookup, DomainError> {
        let key = Self::cache_key(name, rtype, class);

        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<StoredRecord>(&bytes) {
                Ok(record) => {
                    debug!(key, "cache hit");
                    return Ok(RecordLookup::hit(record));
                }
                Err(e) => {
                    // Format drift or corruption: drop the entry and
                    // treat it as a miss.
                    warn!(error = %e, key, "unparseable cache entry, evicting");
                    if let Err(e) = self.cache.del(&key).await {
                        warn!(error = %e, key, "failed to evict corrupt cache entry");
                    }
                }
            },
            Ok(None) => {
                debug!(key, "cache miss");
            }
            Err(e) => {
                warn!(error = %e, key, "cache read failed, falling through to store");
            }
        }

        let lookup = self.inner.lookup_record(name, rtype, class).await?;
        if let Some(record) = &lookup.record {
            self.store_entry(record).await;
        }
        Ok(RecordLookup::miss(lookup.record))
    }

    async fn create_zone(&self, owner: &str, name: &str) -> Result<Zone, DomainError> {
        self.inner.create_zone(owner, name).await
    }

    async fn get_zone(&self, id: i64) -> Result<Option<Zone>, DomainError> {
        self.inner.get_zone(id).await
    }

    async fn list_zones(&self, owner: Option<&str>) -> Result<Vec<Zone>, DomainError> {
        self.inner.list_zones(owner).await
    }

    async fn delete_zone(&self, id: i64) -> Result<(), DomainError> {
        // Tombstoned zones stop resolving once their record entries
        // expire; the cache TTL is the consistency bound.
        self.inner.delete_zone(id).await
    }

    async fn list_records(&self, zone_id: i64) -> Result<Vec<StoredRecord>, DomainError> {
        self.inner.list_records(zone_id).await
    }

    async fn get_record(&self, id: i64) -> Result<Option<StoredRecord>, DomainError> {
        self.inner.get_record(id).await
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<StoredRecord, DomainError> {
        let record = self.inner.create_record(draft).await?;
        self.store_entry(&record).await;
        Ok(record)
    }

    async fn update_record(
        &self,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<StoredRecord, DomainError> {
        let previous = self.inner.get_record(id).await?;
        let record = self.inner.update_record(id, draft).await?;

        if let Some(previous) = previous {
            if Self::record_key(&previous) != Self::record_key(&record) {
                self.invalidate(&previous).await;
            }
        }
        self.store_entry(&record).await;
        Ok(record)
    }

    async fn delete_record(&self, id: i64) -> Result<(), DomainError> {
        let previous = self.inner.get_record(id).await?;
        self.inner.delete_record(id).await?;
        if let Some(previous) = previous {
            self.invalidate(&previous).await;
        }
        Ok(())
    }
}
