use dnscheck_application::ports::LookupRepository;
use dnscheck_infrastructure::repositories::SqliteLookupRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub lookups: Arc<dyn LookupRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            lookups: Arc::new(SqliteLookupRepository::new(pool)),
        }
    }
}
