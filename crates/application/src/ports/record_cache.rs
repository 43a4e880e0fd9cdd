use async_trait::async_trait;
use cobalt_dns_domain::DomainError;
use std::time::Duration;

/// Byte-oriented cache with TTL expiry owned by the backend: a `get`
/// never returns an expired entry, and nothing here scans for expiry.
#[async_trait]
pub trait RecordCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError>;
    async fn del(&self, key: &str) -> Result<(), DomainError>;
}
