use crate::{DomainError, Host, RecordType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Terminal state of a single (host, resolver) query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum QueryOutcome {
    Success,
    Timeout,
    NoSuchRecord,
    ServerFailure,
    NetworkError,
}

impl QueryOutcome {
    pub const ALL: [QueryOutcome; 5] = [
        QueryOutcome::Success,
        QueryOutcome::Timeout,
        QueryOutcome::NoSuchRecord,
        QueryOutcome::ServerFailure,
        QueryOutcome::NetworkError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOutcome::Success => "success",
            QueryOutcome::Timeout => "timeout",
            QueryOutcome::NoSuchRecord => "no-such-record",
            QueryOutcome::ServerFailure => "server-failure",
            QueryOutcome::NetworkError => "network-error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success)
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single query did not produce records.
///
/// Returned by resolver clients and folded into the [`QueryResult`]; it never
/// escapes the lookup engine as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    #[error("query timed out")]
    Timeout,

    #[error("no such record: {0}")]
    NoSuchRecord(String),

    #[error("server failure: {0}")]
    ServerFailure(String),

    #[error("network error: {0}")]
    Network(String),
}

impl QueryFailure {
    pub fn outcome(&self) -> QueryOutcome {
        match self {
            QueryFailure::Timeout => QueryOutcome::Timeout,
            QueryFailure::NoSuchRecord(_) => QueryOutcome::NoSuchRecord,
            QueryFailure::ServerFailure(_) => QueryOutcome::ServerFailure,
            QueryFailure::Network(_) => QueryOutcome::NetworkError,
        }
    }
}

/// Outcome of one (host, resolver, record type) query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub host: Host,
    pub resolver: Arc<str>,
    /// Record values in the order the resolver returned them.
    pub values: Vec<String>,
    /// Wall time spent on the query, in microseconds.
    pub elapsed_us: u64,
    pub outcome: QueryOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    pub fn success(host: Host, resolver: Arc<str>, values: Vec<String>, elapsed: Duration) -> Self {
        Self {
            host,
            resolver,
            values,
            elapsed_us: duration_to_us(elapsed),
            outcome: QueryOutcome::Success,
            error: None,
        }
    }

    pub fn failed(host: Host, resolver: Arc<str>, failure: &QueryFailure, elapsed: Duration) -> Self {
        Self {
            host,
            resolver,
            values: Vec::new(),
            elapsed_us: duration_to_us(elapsed),
            outcome: failure.outcome(),
            error: Some(failure.to_string()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_us)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_us as f64 / 1000.0
    }

    /// Values sorted for order-insensitive comparison across resolvers.
    pub fn sorted_values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.values.iter().map(String::as_str).collect();
        values.sort_unstable();
        values
    }
}

fn duration_to_us(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

/// What was asked for, recorded alongside the answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupMetadata {
    pub hosts: Vec<Host>,
    pub record_type: RecordType,
    pub group: Arc<str>,
    pub resolvers: Vec<Arc<str>>,
    pub created_at: DateTime<Utc>,
}

/// All results for one host position, in resolver-group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResults {
    pub host: Host,
    pub results: Vec<QueryResult>,
}

impl HostResults {
    pub fn get(&self, resolver: &str) -> Option<&QueryResult> {
        self.results.iter().find(|r| r.resolver.as_ref() == resolver)
    }
}

/// Complete answer to one submitted batch.
///
/// Entries follow the request's host order and, within a host, the resolver
/// group's order. A complete set holds exactly one result per (host position,
/// resolver position).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResultSet {
    pub metadata: LookupMetadata,
    pub entries: Vec<HostResults>,
}

impl LookupResultSet {
    pub fn query_count(&self) -> usize {
        self.entries.iter().map(|e| e.results.len()).sum()
    }

    pub fn results(&self) -> impl Iterator<Item = &QueryResult> {
        self.entries.iter().flat_map(|e| e.results.iter())
    }

    /// First entry for `host`; repeated hosts are only reachable through
    /// [`entries`](Self::entries).
    pub fn host_results(&self, host: &str) -> Option<&HostResults> {
        self.entries.iter().find(|e| e.host.as_str() == host)
    }

    pub fn get(&self, host: &str, resolver: &str) -> Option<&QueryResult> {
        self.host_results(host).and_then(|e| e.get(resolver))
    }

    /// Checks that every (host, resolver) pair of the request has exactly one
    /// result, in request order.
    pub fn verify_complete(&self) -> Result<(), DomainError> {
        let meta = &self.metadata;
        if meta.hosts.is_empty() || meta.resolvers.is_empty() {
            return Err(DomainError::IntegrityError(
                "result set has no hosts or no resolvers".to_string(),
            ));
        }
        if self.entries.len() != meta.hosts.len() {
            return Err(DomainError::IntegrityError(format!(
                "expected {} host entries, found {}",
                meta.hosts.len(),
                self.entries.len()
            )));
        }

        for (entry, host) in self.entries.iter().zip(&meta.hosts) {
            if &entry.host != host {
                return Err(DomainError::IntegrityError(format!(
                    "host entry '{}' does not match requested host '{}'",
                    entry.host, host
                )));
            }
            if entry.results.len() != meta.resolvers.len() {
                return Err(DomainError::IntegrityError(format!(
                    "host '{}' has {} results for {} resolvers",
                    host,
                    entry.results.len(),
                    meta.resolvers.len()
                )));
            }
            for (result, resolver) in entry.results.iter().zip(&meta.resolvers) {
                if &result.host != host || &result.resolver != resolver {
                    return Err(DomainError::IntegrityError(format!(
                        "slot for ({}, {}) holds result for ({}, {})",
                        host, resolver, result.host, result.resolver
                    )));
                }
            }
        }
        Ok(())
    }
}
