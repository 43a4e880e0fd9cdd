use super::api::ApiConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::metrics::MetricsConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;
use serde::{Deserialize, Serialize};

/// Main configuration. Every field is read from the environment with a
/// default; only the store DSN is mandatory.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            api: ApiConfig::from_env()?,
            store: StoreConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            metrics: MetricsConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        })
    }

    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::from_env()?;
        config.apply_cli_overrides(overrides);
        Ok(config)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.port = port;
        }
        if let Some(port) = overrides.api_port {
            self.api.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.host = bind.clone();
            self.api.host = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "DNS port cannot be 0".to_string(),
            ));
        }
        if self.server.buffer_size < crate::wire::HEADER_LEN {
            return Err(ConfigError::Validation(format!(
                "receive buffer of {} octets cannot hold a DNS header",
                self.server.buffer_size
            )));
        }
        if self.store.dsn.is_empty() {
            return Err(ConfigError::Validation(
                "STORE_DSN must be set".to_string(),
            ));
        }
        if self.metrics.max_batch_size == 0 {
            return Err(ConfigError::Validation(
                "metrics batch size cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub api_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
