use axum::{extract::State, response::Json, routing::get, Router};
use tracing::debug;

use crate::{dto::ResolversResponse, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/resolvers", get(get_resolvers))
}

async fn get_resolvers(State(state): State<AppState>) -> Json<ResolversResponse> {
    let groups = state.get_resolvers.get_all();
    debug!(count = groups.len(), "Resolver groups retrieved");
    Json(ResolversResponse::new(groups))
}
