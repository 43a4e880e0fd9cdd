use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// One sample per inbound datagram that begins processing. Produced by
/// the query server, handed by value to the ingestion pipeline, and
/// dropped (never blocked on) when the ingest buffer is full.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub client_ip: IpAddr,
    pub domain: String,
    pub query_type: String,
    pub success: bool,
    pub error_message: String,
    pub response_time_ms: f64,
    pub cache_hit: bool,
    pub rcode: u8,
}

/// IANA name for an RCODE value.
pub fn rcode_name(rcode: u8) -> &'static str {
    match rcode {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        6 => "YXDOMAIN",
        7 => "YXRRSET",
        8 => "NXRRSET",
        9 => "NOTAUTH",
        10 => "NOTZONE",
        11 => "BADVERS",
        12 => "BADKEY",
        13 => "BADTIME",
        14 => "BADMODE",
        15 => "BADNAME",
        16 => "BADALG",
        17 => "BADTRUNC",
        18 => "BADCOOKIE",
        _ => "UNKNOWN",
    }
}

// Read models for the query-side metrics interface.

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: DateTime<Utc>,
    pub requests: u64,
    pub errors: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QpmPoint {
    pub time: DateTime<Utc>,
    pub requests: u64,
    pub errors: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricsSummary {
    pub avg_response_time_ms: f64,
    pub avg_success_response_time_ms: f64,
    pub avg_error_response_time_ms: f64,
    pub cache_hit_percentage: f64,
    pub total_requests: u64,
    pub total_errors: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainHits {
    pub domain: String,
    pub hits: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RcodeSlice {
    pub rcode: u8,
    pub name: &'static str,
    pub count: u64,
}
