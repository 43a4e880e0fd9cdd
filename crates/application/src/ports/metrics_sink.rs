use async_trait::async_trait;
use cobalt_dns_domain::{DomainError, MetricSample};

/// Bulk append into the columnar metrics store. Batching is the
/// ingestion pipeline's concern, not the sink's.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn append_batch(&self, batch: &[MetricSample]) -> Result<(), DomainError>;
}
