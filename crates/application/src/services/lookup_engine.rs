use super::result_aggregator::ResultAggregator;
use crate::ports::UpstreamResolver;
use chrono::Utc;
use dnscheck_domain::config::LookupConfig;
use dnscheck_domain::{
    DnsQuery, DomainError, Host, LookupMetadata, LookupResultSet, QueryFailure, QueryResult,
    RecordType, ResolverGroup,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// Immutable engine settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSettings {
    pub concurrency_limit: usize,
    pub per_query_timeout: Duration,
}

impl LookupSettings {
    pub fn new(concurrency_limit: usize, per_query_timeout: Duration) -> Self {
        Self {
            concurrency_limit,
            per_query_timeout,
        }
    }
}

impl From<&LookupConfig> for LookupSettings {
    fn from(config: &LookupConfig) -> Self {
        Self::new(config.concurrency, config.query_timeout())
    }
}

/// Runs every (host, resolver) query of a batch through a bounded worker pool.
///
/// ## Scheduling
///
/// The Cartesian product `hosts × resolvers` is built up front as an
/// immutable queue. `min(concurrency_limit, queries)` workers claim queries
/// through a shared atomic cursor and run them one at a time, so no more than
/// `concurrency_limit` queries are ever in flight. Query `i` writes only to
/// result slot `i`.
///
/// ## Failures
///
/// Timeouts and resolver failures become the query's outcome and never stop
/// sibling queries. `execute` itself fails only on pre-flight errors, or if a
/// worker dies and the result set cannot be completed.
pub struct LookupEngine {
    resolver: Arc<dyn UpstreamResolver>,
    settings: LookupSettings,
}

impl LookupEngine {
    pub fn new(resolver: Arc<dyn UpstreamResolver>, settings: LookupSettings) -> Self {
        Self { resolver, settings }
    }

    pub fn settings(&self) -> LookupSettings {
        self.settings
    }

    #[instrument(
        skip(self, hosts, group),
        fields(group = %group.name, hosts = hosts.len(), record_type = %record_type)
    )]
    pub async fn execute(
        &self,
        hosts: &[Host],
        group: &ResolverGroup,
        record_type: RecordType,
    ) -> Result<LookupResultSet, DomainError> {
        if hosts.is_empty() {
            return Err(DomainError::input("no hosts provided"));
        }
        if group.is_empty() {
            return Err(DomainError::input(format!(
                "resolver group '{}' has no addresses",
                group.name
            )));
        }
        if self.settings.concurrency_limit == 0 {
            return Err(DomainError::input("concurrency limit must be at least 1"));
        }

        let queries: Arc<[DnsQuery]> = hosts
            .iter()
            .flat_map(|host| {
                group
                    .addresses
                    .iter()
                    .map(move |resolver| DnsQuery::new(host.clone(), Arc::clone(resolver), record_type))
            })
            .collect();

        let aggregator = Arc::new(ResultAggregator::new(hosts.len(), group.len()));
        let cursor = Arc::new(AtomicUsize::new(0));
        let worker_count = self.settings.concurrency_limit.min(queries.len());
        let started = Instant::now();

        debug!(
            queries = queries.len(),
            workers = worker_count,
            "Dispatching lookup batch"
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..worker_count {
            workers.spawn(run_worker(
                worker_id,
                Arc::clone(&queries),
                Arc::clone(&cursor),
                Arc::clone(&aggregator),
                Arc::clone(&self.resolver),
                self.settings.per_query_timeout,
            ));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Lookup worker terminated abnormally");
                return Err(DomainError::IntegrityError(format!(
                    "lookup worker failed: {}",
                    e
                )));
            }
        }

        let aggregator = Arc::try_unwrap(aggregator).map_err(|_| {
            DomainError::IntegrityError("result slots still shared after workers joined".into())
        })?;

        let metadata = LookupMetadata {
            hosts: hosts.to_vec(),
            record_type,
            group: Arc::clone(&group.name),
            resolvers: group.addresses.clone(),
            created_at: Utc::now(),
        };
        let results = aggregator.assemble(metadata)?;

        info!(
            queries = results.query_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Lookup batch complete"
        );

        Ok(results)
    }
}

async fn run_worker(
    worker_id: usize,
    queries: Arc<[DnsQuery]>,
    cursor: Arc<AtomicUsize>,
    aggregator: Arc<ResultAggregator>,
    resolver: Arc<dyn UpstreamResolver>,
    per_query_timeout: Duration,
) {
    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(query) = queries.get(index) else {
            break;
        };

        let result = run_query(resolver.as_ref(), query, per_query_timeout).await;
        if let Err(e) = aggregator.record(index, result) {
            warn!(worker = worker_id, slot = index, error = %e, "Dropped duplicate result");
        }
    }
}

/// Single attempt, bounded by `per_query_timeout`.
async fn run_query(
    resolver: &dyn UpstreamResolver,
    query: &DnsQuery,
    per_query_timeout: Duration,
) -> QueryResult {
    let start = Instant::now();
    let attempt = timeout(per_query_timeout, resolver.resolve(query, per_query_timeout)).await;
    let elapsed = start.elapsed();

    let host = query.host.clone();
    let server = Arc::clone(&query.resolver);

    match attempt {
        Ok(Ok(values)) => {
            debug!(
                host = %query.host,
                resolver = %query.resolver,
                answers = values.len(),
                latency_us = elapsed.as_micros() as u64,
                "Query succeeded"
            );
            QueryResult::success(host, server, values, elapsed)
        }
        Ok(Err(failure)) => {
            debug!(
                host = %query.host,
                resolver = %query.resolver,
                outcome = %failure.outcome(),
                error = %failure,
                "Query failed"
            );
            QueryResult::failed(host, server, &failure, elapsed)
        }
        Err(_) => {
            debug!(
                host = %query.host,
                resolver = %query.resolver,
                timeout_ms = per_query_timeout.as_millis() as u64,
                "Query timed out"
            );
            QueryResult::failed(host, server, &QueryFailure::Timeout, elapsed)
        }
    }
}
