use chrono::{DateTime, Utc};
use cobalt_dns_domain::{DomainHits, MetricsSummary, QpmPoint, RcodeSlice, TimeSeriesPoint};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct SummaryQuery {
    #[serde(default = "default_hours")]
    pub hours: u32,
}

fn default_hours() -> u32 {
    24
}

#[derive(Deserialize, Debug)]
pub struct TopDomainsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

#[derive(Deserialize, Debug)]
pub struct QpmQuery {
    #[serde(default = "default_period")]
    pub period: u64,
    #[serde(default = "default_points")]
    pub limit: u32,
}

fn default_period() -> u64 {
    3600
}

fn default_points() -> u32 {
    60
}

#[derive(Serialize, Debug)]
pub struct SummaryDto {
    pub avg_response_time_ms: f64,
    pub avg_success_response_time_ms: f64,
    pub avg_error_response_time_ms: f64,
    pub cache_hit_percentage: f64,
    pub total_requests: u64,
    pub total_errors: u64,
}

impl From<MetricsSummary> for SummaryDto {
    fn from(summary: MetricsSummary) -> Self {
        Self {
            avg_response_time_ms: summary.avg_response_time_ms,
            avg_success_response_time_ms: summary.avg_success_response_time_ms,
            avg_error_response_time_ms: summary.avg_error_response_time_ms,
            cache_hit_percentage: summary.cache_hit_percentage,
            total_requests: summary.total_requests,
            total_errors: summary.total_errors,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct TimeSeriesPointDto {
    pub time: DateTime<Utc>,
    pub requests: u64,
    pub errors: u64,
}

impl From<TimeSeriesPoint> for TimeSeriesPointDto {
    fn from(point: TimeSeriesPoint) -> Self {
        Self {
            time: point.time,
            requests: point.requests,
            errors: point.errors,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct QpmPointDto {
    pub time: DateTime<Utc>,
    pub requests: u64,
    pub errors: u64,
    pub success_rate: f64,
}

impl From<QpmPoint> for QpmPointDto {
    fn from(point: QpmPoint) -> Self {
        Self {
            time: point.time,
            requests: point.requests,
            errors: point.errors,
            success_rate: point.success_rate,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DomainHitsDto {
    pub domain: String,
    pub hits: u64,
}

impl From<DomainHits> for DomainHitsDto {
    fn from(hits: DomainHits) -> Self {
        Self {
            domain: hits.domain,
            hits: hits.hits,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct RcodeSliceDto {
    pub rcode: u8,
    pub name: String,
    pub count: u64,
}

impl From<RcodeSlice> for RcodeSliceDto {
    fn from(slice: RcodeSlice) -> Self {
        Self {
            rcode: slice.rcode,
            name: slice.name.to_string(),
            count: slice.count,
        }
    }
}
