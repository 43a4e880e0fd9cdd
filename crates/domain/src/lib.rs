pub mod config;
pub mod errors;
pub mod metric;
pub mod record_class;
pub mod record_data;
pub mod record_type;
pub mod stored_record;
pub mod wire;
pub mod zone;

pub use config::{
    ApiConfig, CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, MetricsConfig,
    ServerConfig, StoreConfig,
};
pub use errors::DomainError;
pub use metric::{
    rcode_name, DomainHits, MetricSample, MetricsSummary, QpmPoint, RcodeSlice, TimeSeriesPoint,
};
pub use record_class::RecordClass;
pub use record_type::RecordType;
pub use stored_record::{RecordDraft, StoredRecord};
pub use zone::Zone;
