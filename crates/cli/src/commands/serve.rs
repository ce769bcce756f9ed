use crate::bootstrap::{build_registry, init_database};
use crate::di::{Repositories, UseCases};
use crate::server::start_http_server;
use dnscheck_domain::Config;
use std::sync::Arc;

pub async fn run_serve(config: Config) -> anyhow::Result<()> {
    let registry = Arc::new(build_registry(&config.resolvers).await?);
    let pool = init_database(&config.database.url()).await?;

    let repos = Repositories::new(pool);
    let use_cases = UseCases::new(&config, registry, &repos);

    start_http_server(&config.server, use_cases.into_app_state()).await
}
