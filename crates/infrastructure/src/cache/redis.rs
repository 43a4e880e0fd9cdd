use async_trait::async_trait;
use cobalt_dns_application::ports::RecordCache;
use cobalt_dns_domain::{CacheConfig, DomainError};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::info;

/// Redis-backed record cache. Expiry is delegated to the server via
/// per-key TTLs; nothing here scans.
pub struct RedisRecordCache {
    conn: ConnectionManager,
}

impl RedisRecordCache {
    pub async fn connect(cfg: &CacheConfig) -> Result<Self, DomainError> {
        let url = if cfg.password.is_empty() {
            format!("redis://{}/{}", cfg.addr, cfg.db)
        } else {
            format!(
                "redis://{}:{}@{}/{}",
                cfg.username, cfg.password, cfg.addr, cfg.db
            )
        };

        let client = redis::Client::open(url)
            .map_err(|e| DomainError::CacheError(format!("invalid cache endpoint: {}", e)))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::CacheError(format!("cache connection failed: {}", e)))?;

        info!(addr = %cfg.addr, db = cfg.db, "record cache connected");
        Ok(Self { conn })
    }
}

#[async_trait]
impl RecordCache for RedisRecordCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, value, ttl.as_secs().max(1))
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del(key)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))
    }
}
