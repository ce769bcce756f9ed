use async_trait::async_trait;
use dnscheck_domain::{DnsQuery, QueryFailure};
use std::time::Duration;

/// Client able to send one DNS question to one resolver.
///
/// Implementations must not retry: the lookup engine relies on at most one
/// attempt per (host, resolver, record type).
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Returns the record values from the answer section, formatted as text,
    /// in the order the resolver sent them.
    ///
    /// `timeout` is the budget for the whole exchange; the engine enforces it
    /// independently as well.
    async fn resolve(&self, query: &DnsQuery, timeout: Duration)
        -> Result<Vec<String>, QueryFailure>;
}
