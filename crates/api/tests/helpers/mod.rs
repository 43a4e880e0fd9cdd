#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use cobalt_dns_api::{create_api_routes, AppState};
use cobalt_dns_application::ports::{MetricsReader, RecordLookup, RecordStore};
use cobalt_dns_domain::{
    DomainError, DomainHits, MetricsSummary, QpmPoint, RcodeSlice, RecordClass, RecordDraft,
    RecordType, StoredRecord, TimeSeriesPoint, Zone,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_app() -> (axum::Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState {
        store: store.clone(),
        metrics: Arc::new(CannedMetricsReader),
    };
    (create_api_routes(state), store)
}

pub struct InMemoryStore {
    zones: Mutex<HashMap<i64, Zone>>,
    records: Mutex<HashMap<i64, StoredRecord>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            zones: Mutex::new(HashMap::new()),
            records: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn lookup_record(
        &self,
        name: &str,
        rtype: RecordType,
        class: RecordClass,
    ) -> Result<RecordLookup, DomainError> {
        let wanted = name.to_lowercase();
        Ok(RecordLookup::miss(
            self.records
                .lock()
                .unwrap()
                .values()
                .find(|r| {
                    r.name.to_lowercase() == wanted
                        && r.record_type == rtype
                        && r.class == class
                })
                .cloned(),
        ))
    }

    async fn create_zone(&self, owner: &str, name: &str) -> Result<Zone, DomainError> {
        let mut zones = self.zones.lock().unwrap();
        if zones.values().any(|z| z.name == name) {
            return Err(DomainError::ZoneAlreadyExists(name.to_string()));
        }
        let id = self.next_id();
        let zone = Zone {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        zones.insert(id, zone.clone());
        Ok(zone)
    }

    async fn get_zone(&self, id: i64) -> Result<Option<Zone>, DomainError> {
        Ok(self
            .zones
            .lock()
            .unwrap()
            .get(&id)
            .filter(|z| !z.is_deleted())
            .cloned())
    }

    async fn list_zones(&self, owner: Option<&str>) -> Result<Vec<Zone>, DomainError> {
        Ok(self
            .zones
            .lock()
            .unwrap()
            .values()
            .filter(|z| !z.is_deleted())
            .filter(|z| owner.map_or(true, |o| z.owner == o))
            .cloned()
            .collect())
    }

    async fn delete_zone(&self, id: i64) -> Result<(), DomainError> {
        let mut zones = self.zones.lock().unwrap();
        match zones.get_mut(&id) {
            Some(zone) if !zone.is_deleted() => {
                zone.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(DomainError::ZoneNotFound(id)),
        }
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
        if self.get_zone(draft.zone_id).await?.is_none() {
            return Err(DomainError::ZoneNotFound(draft.zone_id));
        }
        let mut records = self.records.lock().unwrap();
        let duplicate = records.values().any(|r| {
            r.zone_id == draft.zone_id
                && r.name == draft.name
                && r.record_type == draft.record_type
                && r.class == draft.class
                && r.rdata == draft.rdata
        });
        if duplicate {
            return Err(DomainError::DuplicateRecord);
        }
        let id = self.next_id();
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
        records.insert(id, record.clone());
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

pub struct CannedMetricsReader;

#[async_trait]
impl MetricsReader for CannedMetricsReader {
    async fn monthly_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError> {
        Ok(vec![TimeSeriesPoint {
            time: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            requests: 120,
            errors: 3,
        }])
    }

    async fn daily_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError> {
        Ok(vec![])
    }

    async fn summary(&self, _lookback_hours: u32) -> Result<MetricsSummary, DomainError> {
        Ok(MetricsSummary {
            avg_response_time_ms: 1.5,
            avg_success_response_time_ms: 1.2,
            avg_error_response_time_ms: 4.0,
            cache_hit_percentage: 83.0,
            total_requests: 100,
            total_errors: 7,
        })
    }

    async fn top_domains(&self, limit: u32) -> Result<Vec<DomainHits>, DomainError> {
        Ok((0..limit.min(2))
            .map(|i| DomainHits {
                domain: format!("d{}.example.com", i),
                hits: 10 - u64::from(i),
            })
            .collect())
    }

    async fn rcode_distribution(&self) -> Result<Vec<RcodeSlice>, DomainError> {
        Ok(vec![
            RcodeSlice {
                rcode: 0,
                name: "NOERROR",
                count: 90,
            },
            RcodeSlice {
                rcode: 3,
                name: "NXDOMAIN",
                count: 10,
            },
        ])
    }

    async fn queries_per_minute(
        &self,
        _period_secs: u64,
        _limit: u32,
    ) -> Result<Vec<QpmPoint>, DomainError> {
        Ok(vec![])
    }
}
