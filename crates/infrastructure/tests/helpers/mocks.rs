#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use cobalt_dns_application::ports::{MetricsSink, RecordCache, RecordLookup, RecordStore};
use cobalt_dns_domain::{
    DomainError, MetricSample, RecordClass, RecordDraft, RecordType, StoredRecord, Zone,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub fn draft(name: &str, rtype: RecordType, ttl: u32, rdata: &str) -> RecordDraft {
    RecordDraft {
        zone_id: 1,
        name: name.to_string(),
        record_type: rtype,
        class: RecordClass::IN,
        ttl,
        rdata: rdata.to_string(),
    }
}

// ============================================================================
// Mock RecordStore
// ============================================================================

pub struct MockRecordStore {
    records: Mutex<HashMap<i64, StoredRecord>>,
    next_id: AtomicI64,
    lookups: AtomicU64,
    fail_lookups: Mutex<bool>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            lookups: AtomicU64::new(0),
            fail_lookups: Mutex::new(false),
        }
    }

    pub fn seed(&self, name: &str, rtype: RecordType, ttl: u32, rdata: &str) -> StoredRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredRecord {
            id,
            zone_id: 1,
            name: name.to_string(),
            record_type: rtype,
            class: RecordClass::IN,
            ttl,
            rdata: rdata.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.records.lock().unwrap().insert(id, record.clone());
        record
    }

    pub fn set_fail_lookups(&self, fail: bool) {
        *self.fail_lookups.lock().unwrap() = fail;
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn lookup_record(
        &self,
        name: &str,
        rtype: RecordType,
        class: RecordClass,
    ) -> Result<RecordLookup, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if *self.fail_lookups.lock().unwrap() {
            return Err(DomainError::DatabaseError("mock store failure".to_string()));
        }
        let wanted = name.to_lowercase();
        let record = self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| {
                r.name.to_lowercase() == wanted && r.record_type == rtype && r.class == class
            })
            .cloned();
        Ok(RecordLookup::miss(record))
    }

    async fn create_zone(&self, owner: &str, name: &str) -> Result<Zone, DomainError> {
        Ok(Zone {
            id: 1,
            owner: owner.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        })
    }

    async fn get_zone(&self, _id: i64) -> Result<Option<Zone>, DomainError> {
        Ok(None)
    }

    async fn list_zones(&self, _owner: Option<&str>) -> Result<Vec<Zone>, DomainError> {
        Ok(vec![])
    }

    async fn delete_zone(&self, _id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_records(&self, zone_id: i64) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect())
    }

    async fn get_record(&self, id: i64) -> Result<Option<StoredRecord>, DomainError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<StoredRecord, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredRecord {
            id,
            zone_id: draft.zone_id,
            name: draft.name.clone(),
            record_type: draft.record_type,
            class: draft.class,
            ttl: draft.ttl,
            rdata: draft.rdata.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.records.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<StoredRecord, DomainError> {
        let mut records = self.records.lock().unwrap();
        let existing = records.get(&id).ok_or(DomainError::RecordNotFound(id))?;
        let record = StoredRecord {
            id,
            zone_id: draft.zone_id,
            name: draft.name.clone(),
            record_type: draft.record_type,
            class: draft.class,
            ttl: draft.ttl,
            rdata: draft.rdata.clone(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn delete_record(&self, id: i64) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::RecordNotFound(id))
    }
}

// ============================================================================
// In-memory RecordCache with real TTL bookkeeping
// ============================================================================

struct MemoryEntry {
    value: Vec<u8>,
    ttl: Duration,
    stored_at: Instant,
}

pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_reads: Mutex::new(false),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn insert_raw(&self, key: &str, value: &[u8], ttl: Duration) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_vec(),
                ttl,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|e| e.ttl)
    }

    pub fn raw_value(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).map(|e| e.value.clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(DomainError::CacheError("mock cache read failure".to_string()));
        }
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < entry.ttl => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(DomainError::CacheError(
                "mock cache write failure".to_string(),
            ));
        }
        self.insert_raw(key, value, ttl);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ============================================================================
// Metrics sinks
// ============================================================================

/// Records every flushed batch.
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<MetricSample>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn batches(&self) -> Vec<Vec<MetricSample>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn samples(&self) -> Vec<MetricSample> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }

    /// Polls until at least `count` samples have been flushed.
    pub async fn wait_for_samples(&self, count: usize) {
        loop {
            if self.samples().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsSink for RecordingSink {
    async fn append_batch(&self, batch: &[MetricSample]) -> Result<(), DomainError> {
        self.batches.lock().unwrap().push(batch.to_vec());
        Ok(())
    }
}

/// Never completes an append; models a wedged sink for backpressure
/// tests.
pub struct BlockingSink;

#[async_trait]
impl MetricsSink for BlockingSink {
    async fn append_batch(&self, _batch: &[MetricSample]) -> Result<(), DomainError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

/// Always fails; the pipeline must log, discard and keep going.
pub struct FailingSink;

#[async_trait]
impl MetricsSink for FailingSink {
    async fn append_batch(&self, _batch: &[MetricSample]) -> Result<(), DomainError> {
        Err(DomainError::MetricsError("sink unavailable".to_string()))
    }
}

pub fn sample(domain: &str) -> MetricSample {
    MetricSample {
        timestamp: Utc::now(),
        client_ip: "192.0.2.1".parse().unwrap(),
        domain: domain.to_string(),
        query_type: "A".to_string(),
        success: true,
        error_message: String::new(),
        response_time_ms: 0.4,
        cache_hit: false,
        rcode: 0,
    }
}
