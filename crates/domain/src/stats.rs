//! Cross-resolver statistics for a completed lookup.
//!
//! Everything here is a pure function of a [`LookupResultSet`]: the summary is
//! recomputed on every request and never stored.

use crate::{DomainError, Host, LookupResultSet, QueryOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the resolvers that answered a host agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agreement {
    Agreeing,
    Disagreeing,
    /// No resolver answered successfully, so there is nothing to compare.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAgreement {
    pub host: Host,
    pub agreement: Agreement,
    pub successful_resolvers: usize,
    /// Number of different answer sets among the successful resolvers.
    pub distinct_answers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub samples: usize,
    pub min_ms: f64,
    pub mean_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub success: u64,
    pub timeout: u64,
    pub no_such_record: u64,
    pub server_failure: u64,
    pub network_error: u64,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: QueryOutcome) {
        match outcome {
            QueryOutcome::Success => self.success += 1,
            QueryOutcome::Timeout => self.timeout += 1,
            QueryOutcome::NoSuchRecord => self.no_such_record += 1,
            QueryOutcome::ServerFailure => self.server_failure += 1,
            QueryOutcome::NetworkError => self.network_error += 1,
        }
    }

    pub fn get(&self, outcome: QueryOutcome) -> u64 {
        match outcome {
            QueryOutcome::Success => self.success,
            QueryOutcome::Timeout => self.timeout,
            QueryOutcome::NoSuchRecord => self.no_such_record,
            QueryOutcome::ServerFailure => self.server_failure,
            QueryOutcome::NetworkError => self.network_error,
        }
    }

    pub fn total(&self) -> u64 {
        QueryOutcome::ALL.iter().map(|o| self.get(*o)).sum()
    }

    pub fn failures(&self) -> u64 {
        self.total() - self.success
    }
}

/// Summary of one result set. Sections disabled in [`StatsOptions`] are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_queries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencyStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<Vec<HostAgreement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<OutcomeCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes_by_resolver: Option<BTreeMap<String, OutcomeCounts>>,
}

impl StatsSummary {
    /// Agreement of the first entry for `host`.
    pub fn agreement_for(&self, host: &str) -> Option<Agreement> {
        self.agreement
            .as_ref()?
            .iter()
            .find(|a| a.host.as_str() == host)
            .map(|a| a.agreement)
    }
}

/// Which metrics [`StatsCalculator`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsOptions {
    #[serde(default = "default_true")]
    pub latency: bool,
    #[serde(default = "default_true")]
    pub agreement: bool,
    #[serde(default = "default_true")]
    pub outcomes: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            latency: true,
            agreement: true,
            outcomes: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCalculator {
    options: StatsOptions,
}

impl StatsCalculator {
    pub fn new(options: StatsOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> StatsOptions {
        self.options
    }

    /// Fails only if the result set is incomplete.
    pub fn summarize(&self, results: &LookupResultSet) -> Result<StatsSummary, DomainError> {
        results.verify_complete()?;

        Ok(StatsSummary {
            total_queries: results.query_count(),
            latency: self.options.latency.then(|| latency(results)).flatten(),
            agreement: self.options.agreement.then(|| agreement(results)),
            outcomes: self.options.outcomes.then(|| outcome_totals(results)),
            outcomes_by_resolver: self
                .options
                .outcomes
                .then(|| outcomes_by_resolver(results)),
        })
    }
}

fn latency(results: &LookupResultSet) -> Option<LatencyStats> {
    let mut samples = 0usize;
    let mut min_us = u64::MAX;
    let mut max_us = 0u64;
    let mut sum_us: u128 = 0;

    for result in results.results() {
        samples += 1;
        min_us = min_us.min(result.elapsed_us);
        max_us = max_us.max(result.elapsed_us);
        sum_us += u128::from(result.elapsed_us);
    }

    if samples == 0 {
        return None;
    }

    Some(LatencyStats {
        samples,
        min_ms: min_us as f64 / 1000.0,
        mean_ms: sum_us as f64 / samples as f64 / 1000.0,
        max_ms: max_us as f64 / 1000.0,
    })
}

fn agreement(results: &LookupResultSet) -> Vec<HostAgreement> {
    results
        .entries
        .iter()
        .map(|entry| {
            let mut answer_sets: Vec<Vec<&str>> = entry
                .results
                .iter()
                .filter(|r| r.outcome.is_success())
                .map(|r| r.sorted_values())
                .collect();
            let successful_resolvers = answer_sets.len();

            answer_sets.sort_unstable();
            answer_sets.dedup();
            let distinct_answers = answer_sets.len();

            let agreement = match distinct_answers {
                0 => Agreement::Unresolved,
                1 => Agreement::Agreeing,
                _ => Agreement::Disagreeing,
            };

            HostAgreement {
                host: entry.host.clone(),
                agreement,
                successful_resolvers,
                distinct_answers,
            }
        })
        .collect()
}

fn outcome_totals(results: &LookupResultSet) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    for result in results.results() {
        counts.record(result.outcome);
    }
    counts
}

fn outcomes_by_resolver(results: &LookupResultSet) -> BTreeMap<String, OutcomeCounts> {
    let mut by_resolver: BTreeMap<String, OutcomeCounts> = BTreeMap::new();
    for result in results.results() {
        by_resolver
            .entry(result.resolver.to_string())
            .or_default()
            .record(result.outcome);
    }
    by_resolver
}
