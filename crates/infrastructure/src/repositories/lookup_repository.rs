use super::key_generator::generate_key;
use async_trait::async_trait;
use dnscheck_application::ports::LookupRepository;
use dnscheck_domain::{DomainError, LookupResultSet};
use sqlx::{Row, SqlitePool};
use tracing::{debug, error, instrument, warn};

const DEFAULT_KEY_ATTEMPTS: usize = 16;

type KeySource = Box<dyn Fn() -> String + Send + Sync>;

/// Stores result sets as JSON under a short random key.
pub struct SqliteLookupRepository {
    pool: SqlitePool,
    next_key: KeySource,
    max_key_attempts: usize,
}

impl SqliteLookupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            next_key: Box::new(generate_key),
            max_key_attempts: DEFAULT_KEY_ATTEMPTS,
        }
    }

    /// Replaces the key source, mainly to force collisions in tests.
    pub fn with_key_source(
        mut self,
        next_key: impl Fn() -> String + Send + Sync + 'static,
        max_key_attempts: usize,
    ) -> Self {
        self.next_key = Box::new(next_key);
        self.max_key_attempts = max_key_attempts;
        self
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl LookupRepository for SqliteLookupRepository {
    #[instrument(skip(self, results), fields(queries = results.query_count()))]
    async fn store(&self, results: &LookupResultSet) -> Result<String, DomainError> {
        let payload = serde_json::to_string(results).map_err(|e| {
            DomainError::StorageError(format!("failed to encode lookup results: {}", e))
        })?;
        let created_at = results.metadata.created_at.to_rfc3339();

        for attempt in 1..=self.max_key_attempts {
            let key = (self.next_key)();

            let inserted = sqlx::query(
                "INSERT INTO lookups (key, payload, created_at) VALUES (?, ?, ?)",
            )
            .bind(&key)
            .bind(&payload)
            .bind(&created_at)
            .execute(&self.pool)
            .await;

            match inserted {
                Ok(_) => {
                    debug!(key = %key, attempt = attempt, "Lookup stored");
                    return Ok(key);
                }
                Err(e) if is_unique_violation(&e) => {
                    warn!(key = %key, attempt = attempt, "Lookup key collision, retrying");
                }
                Err(e) => {
                    error!(error = %e, "Failed to insert lookup");
                    return Err(DomainError::StorageError(e.to_string()));
                }
            }
        }

        Err(DomainError::StorageError(format!(
            "no free lookup key after {} attempts",
            self.max_key_attempts
        )))
    }

    #[instrument(skip(self))]
    async fn retrieve(&self, key: &str) -> Result<Option<LookupResultSet>, DomainError> {
        let row = sqlx::query("SELECT payload FROM lookups WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load lookup");
                DomainError::StorageError(e.to_string())
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row.get("payload");
        let results = serde_json::from_str(&payload).map_err(|e| {
            error!(key = %key, error = %e, "Stored lookup is unreadable");
            DomainError::StorageError(format!("stored lookup '{}' is unreadable: {}", key, e))
        })?;

        Ok(Some(results))
    }
}
