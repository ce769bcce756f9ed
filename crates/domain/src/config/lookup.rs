use crate::StatsOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds applied to every lookup batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Number of queries in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Maximum number of hosts accepted in a single batch
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Per-query timeout in milliseconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Metrics computed for the stats endpoint
    #[serde(default)]
    pub stats: StatsOptions,
}

impl LookupConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            limit: default_limit(),
            query_timeout: default_query_timeout(),
            stats: StatsOptions::default(),
        }
    }
}

fn default_concurrency() -> usize {
    10
}

fn default_limit() -> usize {
    500
}

fn default_query_timeout() -> u64 {
    2000
}
