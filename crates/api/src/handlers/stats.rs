use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use dnscheck_domain::StatsSummary;

use crate::{errors::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stats/{key}", get(get_stats))
}

async fn get_stats(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<StatsSummary>, ApiError> {
    Ok(Json(state.get_stats.execute(&key).await?))
}
