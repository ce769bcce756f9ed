#![allow(dead_code)]
use chrono::Utc;
use dnscheck_domain::{
    Host, HostResults, LookupMetadata, LookupResultSet, QueryFailure, QueryResult, RecordType,
};
use std::sync::Arc;
use std::time::Duration;

/// A complete result set where every query succeeded with `192.0.2.1`,
/// except the last one, which timed out.
pub fn sample_results(hosts: &[&str], resolvers: &[&str]) -> LookupResultSet {
    let hosts: Vec<Host> = hosts.iter().map(|h| Host::parse(h).unwrap()).collect();
    let resolvers: Vec<Arc<str>> = resolvers.iter().map(|r| Arc::from(*r)).collect();
    let total = hosts.len() * resolvers.len();

    let mut n = 0;
    let entries = hosts
        .iter()
        .map(|host| HostResults {
            host: host.clone(),
            results: resolvers
                .iter()
                .map(|resolver| {
                    n += 1;
                    let elapsed = Duration::from_millis(n as u64);
                    if n == total {
                        QueryResult::failed(
                            host.clone(),
                            Arc::clone(resolver),
                            &QueryFailure::Timeout,
                            elapsed,
                        )
                    } else {
                        QueryResult::success(
                            host.clone(),
                            Arc::clone(resolver),
                            vec!["192.0.2.1".to_string()],
                            elapsed,
                        )
                    }
                })
                .collect(),
        })
        .collect();

    LookupResultSet {
        metadata: LookupMetadata {
            hosts,
            record_type: RecordType::A,
            group: Arc::from("Test"),
            resolvers,
            created_at: Utc::now(),
        },
        entries,
    }
}
