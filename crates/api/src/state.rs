use cobalt_dns_application::ports::{MetricsReader, RecordStore};
use std::sync::Arc;

/// The management API is a thin router above the store port and the
/// metrics query driver. Mutations go through the cache-aware store, so
/// write-through and invalidation apply automatically.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub metrics: Arc<dyn MetricsReader>,
}
