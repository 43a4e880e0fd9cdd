use super::{env_parse, env_string, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Receive buffer size in octets. Datagrams longer than this are
    /// truncated by the socket before parsing.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Deadline for the combined cache+store lookup of one query.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_string("DNS_HOST", &default_host()),
            port: env_parse("DNS_PORT", default_port())?,
            buffer_size: env_parse("BUFFER_SIZE", default_buffer_size())?,
            query_timeout_secs: default_query_timeout_secs(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            buffer_size: default_buffer_size(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_buffer_size() -> usize {
    512
}

fn default_query_timeout_secs() -> u64 {
    30
}
