use super::{env_parse, env_string, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_addr")]
    pub addr: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub db: i64,
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            addr: env_string("CACHE_ADDR", &default_addr()),
            username: env_string("CACHE_USER", &default_username()),
            password: env_string("CACHE_PASS", ""),
            db: env_parse("CACHE_DB", 0)?,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            username: default_username(),
            password: String::new(),
            db: 0,
        }
    }
}

fn default_addr() -> String {
    "localhost:6379".to_string()
}

fn default_username() -> String {
    "default".to_string()
}
