use super::{env_string, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    /// Connection string of the persistent record store.
    #[serde(default)]
    pub dsn: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: env_string("STORE_DSN", ""),
            max_connections: default_max_connections(),
        })
    }
}

fn default_max_connections() -> u32 {
    10
}
