use async_trait::async_trait;
use dnscheck_domain::{DomainError, LookupResultSet};

/// Key-value store for completed result sets.
///
/// Implementations generate the key and must round-trip the result set
/// exactly. Failures are reported as `DomainError::StorageError`.
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// Persists `results` and returns the short key it was stored under.
    async fn store(&self, results: &LookupResultSet) -> Result<String, DomainError>;

    /// Returns `Ok(None)` if nothing is stored under `key`.
    async fn retrieve(&self, key: &str) -> Result<Option<LookupResultSet>, DomainError>;
}
