use chrono::Utc;
use dnscheck_domain::{
    Agreement, DomainError, Host, HostResults, LookupMetadata, LookupResultSet, QueryFailure,
    QueryOutcome, QueryResult, RecordType, StatsCalculator, StatsOptions,
};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Builders
// ============================================================================

fn host(name: &str) -> Host {
    Host::parse(name).unwrap()
}

fn ok(h: &str, resolver: &str, values: &[&str], ms: u64) -> QueryResult {
    QueryResult::success(
        host(h),
        Arc::from(resolver),
        values.iter().map(|v| v.to_string()).collect(),
        Duration::from_millis(ms),
    )
}

fn failed(h: &str, resolver: &str, failure: QueryFailure, ms: u64) -> QueryResult {
    QueryResult::failed(host(h), Arc::from(resolver), &failure, Duration::from_millis(ms))
}

fn result_set(resolvers: &[&str], rows: Vec<(&str, Vec<QueryResult>)>) -> LookupResultSet {
    LookupResultSet {
        metadata: LookupMetadata {
            hosts: rows.iter().map(|(h, _)| host(h)).collect(),
            record_type: RecordType::A,
            group: Arc::from("Test"),
            resolvers: resolvers.iter().map(|r| Arc::from(*r)).collect(),
            created_at: Utc::now(),
        },
        entries: rows
            .into_iter()
            .map(|(h, results)| HostResults {
                host: host(h),
                results,
            })
            .collect(),
    }
}

const R1: &str = "8.8.8.8";
const R2: &str = "8.8.4.4";
const R3: &str = "1.1.1.1";

// ============================================================================
// Agreement
// ============================================================================

#[test]
fn test_identical_answers_agree() {
    let set = result_set(
        &[R1, R2],
        vec![(
            "example.com",
            vec![
                ok("example.com", R1, &["192.0.2.1"], 10),
                ok("example.com", R2, &["192.0.2.1"], 12),
            ],
        )],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    assert_eq!(summary.agreement_for("example.com"), Some(Agreement::Agreeing));
}

#[test]
fn test_one_differing_resolver_disagrees() {
    let set = result_set(
        &[R1, R2, R3],
        vec![(
            "example.com",
            vec![
                ok("example.com", R1, &["192.0.2.1"], 10),
                ok("example.com", R2, &["192.0.2.1"], 12),
                ok("example.com", R3, &["198.51.100.7"], 9),
            ],
        )],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    assert_eq!(
        summary.agreement_for("example.com"),
        Some(Agreement::Disagreeing)
    );
    let detail = &summary.agreement.as_ref().unwrap()[0];
    assert_eq!(detail.successful_resolvers, 3);
    assert_eq!(detail.distinct_answers, 2);
}

#[test]
fn test_answer_order_does_not_matter() {
    let set = result_set(
        &[R1, R2],
        vec![(
            "example.com",
            vec![
                ok("example.com", R1, &["192.0.2.1", "192.0.2.2"], 10),
                ok("example.com", R2, &["192.0.2.2", "192.0.2.1"], 12),
            ],
        )],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    assert_eq!(summary.agreement_for("example.com"), Some(Agreement::Agreeing));
}

#[test]
fn test_failed_resolvers_are_ignored_for_agreement() {
    let set = result_set(
        &[R1, R2],
        vec![(
            "example.com",
            vec![
                ok("example.com", R1, &["192.0.2.1"], 10),
                failed("example.com", R2, QueryFailure::Timeout, 2000),
            ],
        )],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    assert_eq!(summary.agreement_for("example.com"), Some(Agreement::Agreeing));
}

#[test]
fn test_no_successful_resolver_is_unresolved() {
    let set = result_set(
        &[R1, R2],
        vec![(
            "nope.invalid",
            vec![
                failed(
                    "nope.invalid",
                    R1,
                    QueryFailure::NoSuchRecord("NXDOMAIN".into()),
                    3,
                ),
                failed(
                    "nope.invalid",
                    R2,
                    QueryFailure::Network("connection refused".into()),
                    1,
                ),
            ],
        )],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    assert_eq!(
        summary.agreement_for("nope.invalid"),
        Some(Agreement::Unresolved)
    );
}

// ============================================================================
// Latency and outcome counts
// ============================================================================

#[test]
fn test_latency_covers_failures_too() {
    let set = result_set(
        &[R1, R2],
        vec![(
            "example.com",
            vec![
                ok("example.com", R1, &["192.0.2.1"], 10),
                failed("example.com", R2, QueryFailure::Timeout, 30),
            ],
        )],
    );

    let latency = StatsCalculator::default()
        .summarize(&set)
        .unwrap()
        .latency
        .unwrap();
    assert_eq!(latency.samples, 2);
    assert_eq!(latency.min_ms, 10.0);
    assert_eq!(latency.mean_ms, 20.0);
    assert_eq!(latency.max_ms, 30.0);
}

#[test]
fn test_outcome_counts_global_and_per_resolver() {
    let set = result_set(
        &[R1, R2],
        vec![
            (
                "a.com",
                vec![
                    ok("a.com", R1, &["192.0.2.1"], 1),
                    failed("a.com", R2, QueryFailure::ServerFailure("SERVFAIL".into()), 1),
                ],
            ),
            (
                "b.com",
                vec![
                    ok("b.com", R1, &["192.0.2.2"], 1),
                    failed("b.com", R2, QueryFailure::Timeout, 1),
                ],
            ),
        ],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    let totals = summary.outcomes.unwrap();
    assert_eq!(totals.total(), 4);
    assert_eq!(totals.get(QueryOutcome::Success), 2);
    assert_eq!(totals.get(QueryOutcome::ServerFailure), 1);
    assert_eq!(totals.get(QueryOutcome::Timeout), 1);
    assert_eq!(totals.failures(), 2);

    let by_resolver = summary.outcomes_by_resolver.unwrap();
    assert_eq!(by_resolver[R1].success, 2);
    assert_eq!(by_resolver[R2].failures(), 2);
    assert_eq!(by_resolver[R2].success, 0);
}

// ============================================================================
// Contract
// ============================================================================

#[test]
fn test_summarize_is_deterministic() {
    let set = result_set(
        &[R1, R2],
        vec![
            (
                "a.com",
                vec![
                    ok("a.com", R1, &["192.0.2.1"], 7),
                    ok("a.com", R2, &["192.0.2.9"], 3),
                ],
            ),
            (
                "b.com",
                vec![
                    ok("b.com", R1, &["192.0.2.2"], 11),
                    failed("b.com", R2, QueryFailure::Timeout, 2000),
                ],
            ),
        ],
    );

    let calculator = StatsCalculator::default();
    assert_eq!(
        calculator.summarize(&set).unwrap(),
        calculator.summarize(&set).unwrap()
    );
}

#[test]
fn test_incomplete_set_is_integrity_error() {
    let set = result_set(
        &[R1, R2],
        vec![("a.com", vec![ok("a.com", R1, &["192.0.2.1"], 7)])],
    );

    assert!(matches!(
        StatsCalculator::default().summarize(&set),
        Err(DomainError::IntegrityError(_))
    ));
}

#[test]
fn test_disabled_sections_are_omitted() {
    let set = result_set(
        &[R1],
        vec![("a.com", vec![ok("a.com", R1, &["192.0.2.1"], 7)])],
    );

    let calculator = StatsCalculator::new(StatsOptions {
        latency: false,
        agreement: true,
        outcomes: false,
    });
    let summary = calculator.summarize(&set).unwrap();
    assert!(summary.latency.is_none());
    assert!(summary.outcomes.is_none());
    assert!(summary.outcomes_by_resolver.is_none());
    assert_eq!(summary.total_queries, 1);
    assert!(summary.agreement.is_some());

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("latency").is_none());
}

#[test]
fn test_repeated_host_gets_one_agreement_per_position() {
    let set = result_set(
        &[R1],
        vec![
            ("a.com", vec![ok("a.com", R1, &["192.0.2.1"], 1)]),
            (
                "a.com",
                vec![failed("a.com", R1, QueryFailure::Timeout, 1)],
            ),
        ],
    );

    let summary = StatsCalculator::default().summarize(&set).unwrap();
    let agreement = summary.agreement.unwrap();
    assert_eq!(agreement.len(), 2);
    assert_eq!(agreement[0].agreement, Agreement::Agreeing);
    assert_eq!(agreement[1].agreement, Agreement::Unresolved);
}
