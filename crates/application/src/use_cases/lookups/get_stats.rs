use crate::ports::LookupRepository;
use dnscheck_domain::{DomainError, StatsCalculator, StatsSummary};
use std::sync::Arc;
use tracing::{error, instrument};

/// Computes the statistics of a stored lookup on demand.
pub struct GetLookupStatsUseCase {
    repository: Arc<dyn LookupRepository>,
    calculator: StatsCalculator,
}

impl GetLookupStatsUseCase {
    pub fn new(repository: Arc<dyn LookupRepository>, calculator: StatsCalculator) -> Self {
        Self {
            repository,
            calculator,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, key: &str) -> Result<StatsSummary, DomainError> {
        let results = self
            .repository
            .retrieve(key)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("lookup '{}'", key)))?;

        self.calculator.summarize(&results).inspect_err(|e| {
            error!(key = %key, error = %e, "Stored lookup failed integrity check");
        })
    }
}
