mod helpers;

use cobalt_dns_application::use_cases::{ResolveOutcome, ResolveQueryUseCase};
use cobalt_dns_domain::wire::Question;
use cobalt_dns_domain::{DomainError, RecordClass, RecordType};
use helpers::mock_store::{stored_record, MockRecordStore};
use std::sync::Arc;
use std::time::Duration;

fn question(name: &str, qtype: RecordType) -> Question {
    Question {
        name: name.to_string(),
        qtype,
        qclass: RecordClass::IN,
    }
}

fn make_use_case(store: Arc<MockRecordStore>) -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(store, Duration::from_secs(5))
}

#[tokio::test]
async fn test_execute_returns_wire_ready_answer() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(stored_record(
        "www.example.com",
        RecordType::A,
        300,
        "192.0.2.10",
    ));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&question("www.example.com", RecordType::A))
        .await
        .unwrap();

    match outcome {
        ResolveOutcome::Answer { record, cache_hit } => {
            assert_eq!(record.rdata, vec![192, 0, 2, 10]);
            assert_eq!(record.ttl, 300);
            assert!(!cache_hit);
        }
        other => panic!("expected an answer, got {:?}", other),
    }
}

#[tokio::test]
async fn test_execute_is_case_insensitive_and_strips_trailing_dot() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(stored_record(
        "www.example.com",
        RecordType::A,
        300,
        "192.0.2.10",
    ));

    let use_case = make_use_case(store);
    let outcome = use_case
        .execute(&question("WWW.Example.COM.", RecordType::A))
        .await
        .unwrap();
    assert!(matches!(outcome, ResolveOutcome::Answer { .. }));
}

#[tokio::test]
async fn test_execute_reports_name_error_on_missing_record() {
    let store = Arc::new(MockRecordStore::new());
    let use_case = make_use_case(store);

    let outcome = use_case
        .execute(&question("absent.example.com", RecordType::A))
        .await
        .unwrap();
    assert!(matches!(outcome, ResolveOutcome::NameError));
}

#[tokio::test]
async fn test_execute_propagates_store_errors() {
    let store = Arc::new(MockRecordStore::new());
    store.set_fail_lookups(true);

    let use_case = make_use_case(store);
    let result = use_case
        .execute(&question("www.example.com", RecordType::A))
        .await;
    assert!(matches!(result, Err(DomainError::DatabaseError(_))));
}

#[tokio::test]
async fn test_execute_times_out_slow_lookups() {
    let store = Arc::new(MockRecordStore::new());
    store.set_delay(Duration::from_secs(60));

    let use_case = ResolveQueryUseCase::new(store, Duration::from_millis(50));
    let result = use_case
        .execute(&question("www.example.com", RecordType::A))
        .await;
    assert!(matches!(result, Err(DomainError::LookupTimeout)));
}

#[tokio::test]
async fn test_execute_rejects_unencodable_stored_data() {
    let store = Arc::new(MockRecordStore::new());
    store.insert(stored_record(
        "broken.example.com",
        RecordType::A,
        300,
        "not-an-ip",
    ));

    let use_case = make_use_case(store);
    let result = use_case
        .execute(&question("broken.example.com", RecordType::A))
        .await;
    assert!(matches!(result, Err(DomainError::InvalidRecordData(_))));
}
