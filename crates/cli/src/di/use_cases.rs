use super::Repositories;
use dnscheck_api::AppState;
use dnscheck_application::services::{LookupEngine, LookupSettings};
use dnscheck_application::use_cases::{
    GetLookupStatsUseCase, GetLookupUseCase, GetResolversUseCase, SubmitLookupUseCase,
};
use dnscheck_domain::{Config, HostParser, ResolverRegistry, StatsCalculator};
use dnscheck_infrastructure::dns::HickoryUpstreamResolver;
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub submit_lookup: Arc<SubmitLookupUseCase>,
    pub get_lookup: Arc<GetLookupUseCase>,
    pub get_stats: Arc<GetLookupStatsUseCase>,
    pub get_resolvers: Arc<GetResolversUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, registry: Arc<ResolverRegistry>, repos: &Repositories) -> Self {
        let settings = LookupSettings::from(&config.lookup);
        info!(
            concurrency = settings.concurrency_limit,
            timeout_ms = settings.per_query_timeout.as_millis() as u64,
            max_hosts = config.lookup.limit,
            "Lookup engine configured"
        );

        let engine = Arc::new(LookupEngine::new(
            Arc::new(HickoryUpstreamResolver::new()),
            settings,
        ));

        Self {
            submit_lookup: Arc::new(SubmitLookupUseCase::new(
                Arc::clone(&registry),
                HostParser::new(config.lookup.limit),
                engine,
                Arc::clone(&repos.lookups),
            )),
            get_lookup: Arc::new(GetLookupUseCase::new(Arc::clone(&repos.lookups))),
            get_stats: Arc::new(GetLookupStatsUseCase::new(
                Arc::clone(&repos.lookups),
                StatsCalculator::new(config.lookup.stats),
            )),
            get_resolvers: Arc::new(GetResolversUseCase::new(registry)),
        }
    }

    pub fn into_app_state(self) -> AppState {
        AppState {
            submit_lookup: self.submit_lookup,
            get_lookup: self.get_lookup,
            get_stats: self.get_stats,
            get_resolvers: self.get_resolvers,
        }
    }
}
