mod clickhouse;
mod ingest;

pub use clickhouse::{
    build_client, ensure_schema, ClickHouseMetricsReader, ClickHouseMetricsSink,
};
pub use ingest::{MetricsPipeline, MetricsRecorder};
