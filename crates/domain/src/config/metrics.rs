use super::{env_parse, env_string, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Batch size at which the ingestion pipeline flushes.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Interval at which non-empty batches are flushed regardless of
    /// size.
    #[serde(default = "default_batch_interval_secs")]
    pub batch_interval_secs: u64,
}

impl MetricsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_string("METRICS_HOST", &default_host()),
            database: env_string("METRICS_DB", &default_database()),
            username: env_string("METRICS_USER", &default_username()),
            password: env_string("METRICS_PASS", ""),
            max_batch_size: env_parse("METRICS_MAX_BATCH_SIZE", default_max_batch_size())?,
            batch_interval_secs: env_parse(
                "METRICS_BATCH_INTERVAL_SEC",
                default_batch_interval_secs(),
            )?,
        })
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            database: default_database(),
            username: default_username(),
            password: String::new(),
            max_batch_size: default_max_batch_size(),
            batch_interval_secs: default_batch_interval_secs(),
        }
    }
}

fn default_host() -> String {
    "localhost:9000".to_string()
}

fn default_database() -> String {
    "default".to_string()
}

fn default_username() -> String {
    "default".to_string()
}

fn default_max_batch_size() -> usize {
    1000
}

fn default_batch_interval_secs() -> u64 {
    5
}
