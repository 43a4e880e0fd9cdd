mod metrics_reader;
mod metrics_sink;
mod record_cache;
mod record_store;

pub use metrics_reader::MetricsReader;
pub use metrics_sink::MetricsSink;
pub use record_cache::RecordCache;
pub use record_store::{RecordLookup, RecordStore};
