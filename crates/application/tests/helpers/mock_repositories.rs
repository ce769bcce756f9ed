#![allow(dead_code)]

use async_trait::async_trait;
use dnscheck_application::ports::{LookupRepository, UpstreamResolver};
use dnscheck_domain::{DnsQuery, DomainError, LookupResultSet, QueryFailure};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock UpstreamResolver
// ============================================================================

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Answer(Vec<String>),
    Fail(QueryFailure),
    /// Never answers within any reasonable timeout.
    Hang,
    Panic,
}

/// Scripted resolver that also records how many queries are in flight.
#[derive(Clone)]
pub struct MockUpstreamResolver {
    behaviors: Arc<RwLock<HashMap<(String, String), MockBehavior>>>,
    default: MockBehavior,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::answering(&["192.0.2.1"])
    }

    pub fn answering(values: &[&str]) -> Self {
        Self {
            behaviors: Arc::new(RwLock::new(HashMap::new())),
            default: MockBehavior::Answer(values.iter().map(|v| v.to_string()).collect()),
            delay: Duration::ZERO,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every query sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Scripts the behaviour for one (host, resolver) pair.
    pub async fn set_behavior(&self, host: &str, resolver: &str, behavior: MockBehavior) {
        self.behaviors
            .write()
            .await
            .insert((host.to_string(), resolver.to_string()), behavior);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(
        &self,
        query: &DnsQuery,
        _timeout: Duration,
    ) -> Result<Vec<String>, QueryFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        let behavior = self
            .behaviors
            .read()
            .await
            .get(&(query.host.to_string(), query.resolver.to_string()))
            .cloned()
            .unwrap_or_else(|| self.default.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match behavior {
            MockBehavior::Answer(values) => Ok(values),
            MockBehavior::Fail(failure) => Err(failure),
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(QueryFailure::Timeout)
            }
            MockBehavior::Panic => panic!("mock resolver panicked"),
        }
    }
}

// ============================================================================
// Mock LookupRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryLookupRepository {
    entries: Arc<RwLock<HashMap<String, LookupResultSet>>>,
    next_id: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl InMemoryLookupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Stores `results` under a caller-chosen key, bypassing key generation.
    pub async fn insert(&self, key: &str, results: LookupResultSet) {
        self.entries.write().await.insert(key.to_string(), results);
    }
}

#[async_trait]
impl LookupRepository for InMemoryLookupRepository {
    async fn store(&self, results: &LookupResultSet) -> Result<String, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("mock store failed".into()));
        }
        let key = format!("key{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.entries
            .write()
            .await
            .insert(key.clone(), results.clone());
        Ok(key)
    }

    async fn retrieve(&self, key: &str) -> Result<Option<LookupResultSet>, DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("mock retrieve failed".into()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }
}
