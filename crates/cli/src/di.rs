use cobalt_dns_application::ports::{MetricsReader, RecordStore};
use cobalt_dns_application::use_cases::ResolveQueryUseCase;
use cobalt_dns_domain::Config;
use cobalt_dns_infrastructure::cache::RedisRecordCache;
use cobalt_dns_infrastructure::dns::QueryHandler;
use cobalt_dns_infrastructure::metrics::{
    build_client, ensure_schema, ClickHouseMetricsReader, ClickHouseMetricsSink, MetricsPipeline,
};
use cobalt_dns_infrastructure::store::{CachedRecordStore, MySqlRecordStore};
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;

/// Everything the servers need, wired together: the cache-through
/// store, the metrics pipeline and query driver, and the per-datagram
/// handler.
pub struct Services {
    pub store: Arc<dyn RecordStore>,
    pub metrics_reader: Arc<dyn MetricsReader>,
    pub handler: Arc<QueryHandler>,
    pub pipeline: MetricsPipeline,
}

impl Services {
    pub async fn build(config: &Config, pool: MySqlPool) -> anyhow::Result<Self> {
        let persistent = Arc::new(MySqlRecordStore::new(pool));
        let cache = Arc::new(RedisRecordCache::connect(&config.cache).await?);
        let store: Arc<dyn RecordStore> = Arc::new(CachedRecordStore::new(persistent, cache));

        let clickhouse = build_client(&config.metrics);
        ensure_schema(&clickhouse).await?;
        let sink = Arc::new(ClickHouseMetricsSink::new(clickhouse.clone()));
        let metrics_reader: Arc<dyn MetricsReader> =
            Arc::new(ClickHouseMetricsReader::new(clickhouse));

        let pipeline = MetricsPipeline::start(
            sink,
            config.metrics.max_batch_size,
            Duration::from_secs(config.metrics.batch_interval_secs),
        );

        let resolver = ResolveQueryUseCase::new(
            store.clone(),
            Duration::from_secs(config.server.query_timeout_secs),
        );
        let handler = Arc::new(QueryHandler::new(resolver, pipeline.recorder()));

        Ok(Self {
            store,
            metrics_reader,
            handler,
            pipeline,
        })
    }
}
