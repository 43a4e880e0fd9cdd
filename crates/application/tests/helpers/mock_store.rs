#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use cobalt_dns_application::ports::{RecordLookup, RecordStore};
use cobalt_dns_domain::{DomainError, RecordClass, RecordDraft, RecordType, StoredRecord, Zone};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn stored_record(name: &str, rtype: RecordType, ttl: u32, rdata: &str) -> StoredRecord {
    StoredRecord {
        id: 1,
        zone_id: 1,
        name: name.to_string(),
        record_type: rtype,
        class: RecordClass::IN,
        ttl,
        rdata: rdata.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory store keyed by (name, type, class). Can be told to fail or
/// to stall to exercise the error and timeout paths.
pub struct MockRecordStore {
    records: Mutex<HashMap<(String, u16, u16), StoredRecord>>,
    lookups: AtomicU64,
    fail_lookups: Mutex<bool>,
    delay: Mutex<Option<Duration>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            lookups: AtomicU64::new(0),
            fail_lookups: Mutex::new(false),
            delay: Mutex::new(None),
        }
    }

    pub fn insert(&self, record: StoredRecord) {
        let key = (
            record.name.to_lowercase(),
            record.record_type.to_u16(),
            record.class.to_u16(),
        );
        self.records.lock().unwrap().insert(key, record);
    }

    pub fn set_fail_lookups(&self, fail: bool) {
        *self.fail_lookups.lock().unwrap() = fail;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
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
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_lookups.lock().unwrap() {
            return Err(DomainError::DatabaseError("mock store failure".to_string()));
        }
        let key = (name.to_lowercase(), rtype.to_u16(), class.to_u16());
        Ok(RecordLookup::miss(
            self.records.lock().unwrap().get(&key).cloned(),
        ))
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

    async fn list_records(&self, _zone_id: i64) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(vec![])
    }

    async fn get_record(&self, _id: i64) -> Result<Option<StoredRecord>, DomainError> {
        Ok(None)
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<StoredRecord, DomainError> {
        let record = StoredRecord {
            id: 1,
            zone_id: draft.zone_id,
            name: draft.name.clone(),
            record_type: draft.record_type,
            class: draft.class,
            ttl: draft.ttl,
            rdata: draft.rdata.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: i64,
        _draft: &RecordDraft,
    ) -> Result<StoredRecord, DomainError> {
        Err(DomainError::RecordNotFound(id))
    }

    async fn delete_record(&self, _id: i64) -> Result<(), DomainError> {
        Ok(())
    }
}
