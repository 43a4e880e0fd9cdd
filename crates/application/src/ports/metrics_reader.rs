use async_trait::async_trait;
use cobalt_dns_domain::{
    DomainError, DomainHits, MetricsSummary, QpmPoint, RcodeSlice, TimeSeriesPoint,
};

/// Read-only query surface over the aggregated metrics, consumed by the
/// HTTP API. All means report 0 instead of NaN when a window is empty.
#[async_trait]
pub trait MetricsReader: Send + Sync {
    async fn monthly_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError>;
    async fn daily_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError>;
    async fn summary(&self, lookback_hours: u32) -> Result<MetricsSummary, DomainError>;
    async fn top_domains(&self, limit: u32) -> Result<Vec<DomainHits>, DomainError>;
    async fn rcode_distribution(&self) -> Result<Vec<RcodeSlice>, DomainError>;
    async fn queries_per_minute(
        &self,
        period_secs: u64,
        limit: u32,
    ) -> Result<Vec<QpmPoint>, DomainError>;
}
