use crate::ports::RecordStore;
use cobalt_dns_domain::wire::{Question, ResourceRecord};
use cobalt_dns_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Outcome of resolving one question against the record store.
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    Answer {
        record: ResourceRecord,
        cache_hit: bool,
    },
    /// No matching record owned by a live zone: NXDOMAIN.
    NameError,
}

/// The hot-path use case: one question in, one authoritative answer (or
/// NXDOMAIN) out. The combined cache+store lookup runs under a single
/// deadline; a timeout surfaces as `LookupTimeout` and is reported to
/// the client as SERVFAIL.
pub struct ResolveQueryUseCase {
    store: Arc<dyn RecordStore>,
    lookup_timeout: Duration,
}

impl ResolveQueryUseCase {
    pub fn new(store: Arc<dyn RecordStore>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            lookup_timeout,
        }
    }

    pub async fn execute(&self, question: &Question) -> Result<ResolveOutcome, DomainError> {
        // Lookups are case-insensitive; normalize once so the cache key
        // and the store query agree.
        let name = question.name.trim_end_matches('.').to_lowercase();

        let lookup = tokio::time::timeout(
            self.lookup_timeout,
            self.store.lookup_record(&name, question.qtype, question.qclass),
        )
        .await
        .map_err(|_| DomainError::LookupTimeout)??;

        match lookup.record {
            None => {
                debug!(name = %name, qtype = %question.qtype, "no record found");
                Ok(ResolveOutcome::NameError)
            }
            Some(record) => Ok(ResolveOutcome::Answer {
                record: record.to_wire()?,
                cache_hit: lookup.cache_hit,
            }),
        }
    }
}
