use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clickhouse::{Client, Row};
use cobalt_dns_application::ports::{MetricsReader, MetricsSink};
use cobalt_dns_domain::{
    rcode_name, DomainError, DomainHits, MetricSample, MetricsConfig, MetricsSummary, QpmPoint,
    RcodeSlice, TimeSeriesPoint,
};
use serde::{Deserialize, Serialize};
use tracing::error;

const METRICS_TABLE: &str = "dns_metrics";

pub fn build_client(cfg: &MetricsConfig) -> Client {
    let url = if cfg.host.starts_with("http://") || cfg.host.starts_with("https://") {
        cfg.host.clone()
    } else {
        format!("http://{}", cfg.host)
    };
    Client::default()
        .with_url(url)
        .with_database(&cfg.database)
        .with_user(&cfg.username)
        .with_password(&cfg.password)
}

/// Creates the metrics table when it does not exist yet.
pub async fn ensure_schema(client: &Client) -> Result<(), DomainError> {
    client
        .query(
            "CREATE TABLE IF NOT EXISTS dns_metrics (
                timestamp DateTime,
                ip String,
                domain String,
                query_type String,
                success UInt8,
                error_message String,
                response_time_ms Float64,
                cache_hit UInt8,
                rcode UInt8
            ) ENGINE = MergeTree ORDER BY timestamp",
        )
        .execute()
        .await
        .map_err(|e| DomainError::MetricsError(e.to_string()))
}

#[derive(Row, Serialize)]
struct MetricRow {
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    timestamp: DateTime<Utc>,
    ip: String,
    domain: String,
    query_type: String,
    success: u8,
    error_message: String,
    response_time_ms: f64,
    cache_hit: u8,
    rcode: u8,
}

impl From<&MetricSample> for MetricRow {
    fn from(sample: &MetricSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            ip: sample.client_ip.to_string(),
            domain: sample.domain.clone(),
            query_type: sample.query_type.clone(),
            success: u8::from(sample.success),
            error_message: sample.error_message.clone(),
            response_time_ms: sample.response_time_ms,
            cache_hit: u8::from(sample.cache_hit),
            rcode: sample.rcode,
        }
    }
}

/// Columnar sink: one prepared insert per batch.
pub struct ClickHouseMetricsSink {
    client: Client,
}

impl ClickHouseMetricsSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricsSink for ClickHouseMetricsSink {
    async fn append_batch(&self, batch: &[MetricSample]) -> Result<(), DomainError> {
        let mut insert = self
            .client
            .insert(METRICS_TABLE)
            .map_err(|e| DomainError::MetricsError(e.to_string()))?;
        for sample in batch {
            insert
                .write(&MetricRow::from(sample))
                .await
                .map_err(|e| DomainError::MetricsError(e.to_string()))?;
        }
        insert
            .end()
            .await
            .map_err(|e| DomainError::MetricsError(e.to_string()))
    }
}

#[derive(Row, Deserialize)]
struct TimePointRow {
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    time: DateTime<Utc>,
    requests: u64,
    errors: u64,
}

#[derive(Row, Deserialize)]
struct SummaryRow {
    avg_response_time_ms: f64,
    avg_success_response_time_ms: f64,
    avg_error_response_time_ms: f64,
    cache_hit_percentage: f64,
    total_requests: u64,
    total_errors: u64,
}

#[derive(Row, Deserialize)]
struct DomainHitsRow {
    domain: String,
    hits: u64,
}

#[derive(Row, Deserialize)]
struct RcodeRow {
    rcode: u8,
    count: u64,
}

#[derive(Row, Deserialize)]
struct QpmRow {
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    time: DateTime<Utc>,
    requests: u64,
    errors: u64,
    success_rate: f64,
}

/// Read-only query driver over the aggregated samples.
pub struct ClickHouseMetricsReader {
    client: Client,
}

impl ClickHouseMetricsReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn metrics_err(e: clickhouse::error::Error) -> DomainError {
    error!(error = %e, "metrics query failed");
    DomainError::MetricsError(e.to_string())
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[async_trait]
impl MetricsReader for ClickHouseMetricsReader {
    async fn monthly_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError> {
        let rows = self
            .client
            .query(
                "SELECT
                    toDateTime(toStartOfMonth(timestamp)) AS time,
                    sum(success) AS requests,
                    sum(1 - success) AS errors
                 FROM dns_metrics
                 GROUP BY time
                 ORDER BY time ASC",
            )
            .fetch_all::<TimePointRow>()
            .await
            .map_err(metrics_err)?;
        Ok(rows
            .into_iter()
            .map(|r| TimeSeriesPoint {
                time: r.time,
                requests: r.requests,
                errors: r.errors,
            })
            .collect())
    }

    async fn daily_requests_errors(&self) -> Result<Vec<TimeSeriesPoint>, DomainError> {
        let rows = self
            .client
            .query(
                "SELECT
                    toStartOfDay(timestamp) AS time,
                    sum(success) AS requests,
                    sum(1 - success) AS errors
                 FROM dns_metrics
                 GROUP BY time
                 ORDER BY time ASC",
            )
            .fetch_all::<TimePointRow>()
            .await
            .map_err(metrics_err)?;
        Ok(rows
            .into_iter()
            .map(|r| TimeSeriesPoint {
                time: r.time,
                requests: r.requests,
                errors: r.errors,
            })
            .collect())
    }

    async fn summary(&self, lookback_hours: u32) -> Result<MetricsSummary, DomainError> {
        let row = self
            .client
            .query(
                "SELECT
                    if(count(*) > 0, avg(response_time_ms), 0) AS avg_response_time_ms,
                    if(countIf(success = 1) > 0, avgIf(response_time_ms, success = 1), 0)
                        AS avg_success_response_time_ms,
                    if(countIf(success = 0) > 0, avgIf(response_time_ms, success = 0), 0)
                        AS avg_error_response_time_ms,
                    if(count(*) > 0, (countIf(cache_hit = 1) * 100.0) / count(*), 0)
                        AS cache_hit_percentage,
                    count(*) AS total_requests,
                    countIf(success = 0) AS total_errors
                 FROM dns_metrics
                 WHERE timestamp >= now() - INTERVAL ? HOUR",
            )
            .bind(lookback_hours)
            .fetch_one::<SummaryRow>()
            .await
            .map_err(metrics_err)?;

        Ok(MetricsSummary {
            avg_response_time_ms: zero_if_nan(row.avg_response_time_ms),
            avg_success_response_time_ms: zero_if_nan(row.avg_success_response_time_ms),
            avg_error_response_time_ms: zero_if_nan(row.avg_error_response_time_ms),
            cache_hit_percentage: zero_if_nan(row.cache_hit_percentage),
            total_requests: row.total_requests,
            total_errors: row.total_errors,
        })
    }

    async fn top_domains(&self, limit: u32) -> Result<Vec<DomainHits>, DomainError> {
        let rows = self
            .client
            .query(
                "SELECT domain, count(*) AS hits
                 FROM dns_metrics
                 GROUP BY domain
                 ORDER BY hits DESC
                 LIMIT ?",
            )
            .bind(limit)
            .fetch_all::<DomainHitsRow>()
            .await
            .map_err(metrics_err)?;
        Ok(rows
            .into_iter()
            .map(|r| DomainHits {
                domain: r.domain,
                hits: r.hits,
            })
            .collect())
    }

    async fn rcode_distribution(&self) -> Result<Vec<RcodeSlice>, DomainError> {
        let rows = self
            .client
            .query(
                "SELECT rcode, count(*) AS count
                 FROM dns_metrics
                 GROUP BY rcode
                 ORDER BY count DESC",
            )
            .fetch_all::<RcodeRow>()
            .await
            .map_err(metrics_err)?;
        Ok(rows
            .into_iter()
            .map(|r| RcodeSlice {
                rcode: r.rcode,
                name: rcode_name(r.rcode),
                count: r.count,
            })
            .collect())
    }

    async fn queries_per_minute(
        &self,
        period_secs: u64,
        limit: u32,
    ) -> Result<Vec<QpmPoint>, DomainError> {
        let rows = self
            .client
            .query(
                "SELECT
                    toStartOfMinute(timestamp) AS time,
                    count(*) AS requests,
                    sum(1 - success) AS errors,
                    if(count(*) > 0, (countIf(success = 1) * 100.0) / count(*), 0)
                        AS success_rate
                 FROM dns_metrics
                 WHERE timestamp >= now() - INTERVAL ? SECOND
                 GROUP BY time
                 ORDER BY time DESC
                 LIMIT ?",
            )
            .bind(period_secs)
            .bind(limit)
            .fetch_all::<QpmRow>()
            .await
            .map_err(metrics_err)?;
        Ok(rows
            .into_iter()
            .map(|r| QpmPoint {
                time: r.time,
                requests: r.requests,
                errors: r.errors,
                success_rate: zero_if_nan(r.success_rate),
            })
            .collect())
    }
}
