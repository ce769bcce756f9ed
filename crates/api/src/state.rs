use dnscheck_application::use_cases::{
    GetLookupStatsUseCase, GetLookupUseCase, GetResolversUseCase, SubmitLookupUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub submit_lookup: Arc<SubmitLookupUseCase>,
    pub get_lookup: Arc<GetLookupUseCase>,
    pub get_stats: Arc<GetLookupStatsUseCase>,
    pub get_resolvers: Arc<GetResolversUseCase>,
}
