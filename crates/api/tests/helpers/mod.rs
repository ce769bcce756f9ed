#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use dnscheck_api::{create_api_routes, AppState};
use dnscheck_application::ports::{LookupRepository, UpstreamResolver};
use dnscheck_application::services::{LookupEngine, LookupSettings};
use dnscheck_application::use_cases::{
    GetLookupStatsUseCase, GetLookupUseCase, GetResolversUseCase, SubmitLookupUseCase,
};
use dnscheck_domain::{
    DnsQuery, DomainError, HostParser, LookupResultSet, QueryFailure, ResolverRegistry,
    StatsCalculator, StatsOptions,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Answers `192.0.2.1` for everything except hosts starting with `missing`.
pub struct FakeResolver;

#[async_trait]
impl UpstreamResolver for FakeResolver {
    async fn resolve(
        &self,
        query: &DnsQuery,
        _timeout: Duration,
    ) -> Result<Vec<String>, QueryFailure> {
        if query.host.as_str().starts_with("missing") {
            Err(QueryFailure::NoSuchRecord("NXDOMAIN".into()))
        } else {
            Ok(vec!["192.0.2.1".into()])
        }
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    entries: RwLock<HashMap<String, LookupResultSet>>,
    next_id: AtomicUsize,
    pub fail: AtomicBool,
}

impl MemoryRepository {
    pub async fn insert(&self, key: &str, results: LookupResultSet) {
        self.entries.write().await.insert(key.to_string(), results);
    }

    pub async fn stored(&self, key: &str) -> LookupResultSet {
        self.entries.read().await[key].clone()
    }
}

#[async_trait]
impl LookupRepository for MemoryRepository {
    async fn store(&self, results: &LookupResultSet) -> Result<String, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("disk full".into()));
        }
        let key = format!("key{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.entries
            .write()
            .await
            .insert(key.clone(), results.clone());
        Ok(key)
    }

    async fn retrieve(&self, key: &str) -> Result<Option<LookupResultSet>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repository: Arc<MemoryRepository>,
}

pub fn test_app(max_hosts: usize) -> TestApp {
    let registry = Arc::new(
        ResolverRegistry::with_defaults(&["127.0.0.53"]).expect("default registry"),
    );
    let repository = Arc::new(MemoryRepository::default());
    let engine = Arc::new(LookupEngine::new(
        Arc::new(FakeResolver),
        LookupSettings::new(4, Duration::from_millis(500)),
    ));

    let state = AppState {
        submit_lookup: Arc::new(SubmitLookupUseCase::new(
            Arc::clone(&registry),
            HostParser::new(max_hosts),
            engine,
            repository.clone(),
        )),
        get_lookup: Arc::new(GetLookupUseCase::new(repository.clone())),
        get_stats: Arc::new(GetLookupStatsUseCase::new(
            repository.clone(),
            StatsCalculator::new(StatsOptions::default()),
        )),
        get_resolvers: Arc::new(GetResolversUseCase::new(registry)),
    };

    TestApp {
        router: create_api_routes(state),
        repository,
    }
}
