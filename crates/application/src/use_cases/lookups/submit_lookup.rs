use crate::ports::LookupRepository;
use crate::services::LookupEngine;
use dnscheck_domain::{DomainError, HostParser, LookupResultSet, RecordType, ResolverRegistry};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// A completed lookup and the key it was stored under.
#[derive(Debug, Clone)]
pub struct SubmittedLookup {
    pub key: String,
    pub results: LookupResultSet,
}

/// Validates a user request, runs the batch and optionally stores it.
///
/// Every input check happens before the first query is sent: record type,
/// resolver group, then the host list.
pub struct SubmitLookupUseCase {
    registry: Arc<ResolverRegistry>,
    parser: HostParser,
    engine: Arc<LookupEngine>,
    repository: Arc<dyn LookupRepository>,
}

impl SubmitLookupUseCase {
    pub fn new(
        registry: Arc<ResolverRegistry>,
        parser: HostParser,
        engine: Arc<LookupEngine>,
        repository: Arc<dyn LookupRepository>,
    ) -> Self {
        Self {
            registry,
            parser,
            engine,
            repository,
        }
    }

    /// Runs the batch without storing it.
    #[instrument(skip(self, raw_hosts))]
    pub async fn lookup(
        &self,
        raw_hosts: &str,
        record_type: &str,
        group_name: &str,
    ) -> Result<LookupResultSet, DomainError> {
        let record_type: RecordType = record_type.parse().map_err(DomainError::InputError)?;
        let group = self.registry.require_group(group_name)?;
        let hosts = self.parser.parse(raw_hosts)?;

        self.engine.execute(&hosts, group, record_type).await
    }

    /// Runs the batch and stores the completed result set.
    ///
    /// # Errors
    ///
    /// * `DomainError::InputError` - bad record type, unknown group or bad hosts
    /// * `DomainError::StorageError` - the batch ran but could not be saved
    #[instrument(skip(self, raw_hosts))]
    pub async fn execute(
        &self,
        raw_hosts: &str,
        record_type: &str,
        group_name: &str,
    ) -> Result<SubmittedLookup, DomainError> {
        let results = self.lookup(raw_hosts, record_type, group_name).await?;

        let key = self.repository.store(&results).await.inspect_err(|e| {
            error!(error = %e, "Failed to store lookup results");
        })?;

        info!(key = %key, queries = results.query_count(), "Lookup stored");
        Ok(SubmittedLookup { key, results })
    }
}
