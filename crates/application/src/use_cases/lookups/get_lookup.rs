use crate::ports::LookupRepository;
use dnscheck_domain::{DomainError, LookupResultSet};
use std::sync::Arc;
use tracing::instrument;

pub struct GetLookupUseCase {
    repository: Arc<dyn LookupRepository>,
}

impl GetLookupUseCase {
    pub fn new(repository: Arc<dyn LookupRepository>) -> Self {
        Self { repository }
    }

    /// Loads a stored result set.
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - nothing stored under `key`
    /// * `DomainError::StorageError` - the store could not be read
    #[instrument(skip(self))]
    pub async fn execute(&self, key: &str) -> Result<LookupResultSet, DomainError> {
        self.repository
            .retrieve(key)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("lookup '{}'", key)))
    }
}
