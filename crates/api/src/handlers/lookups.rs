use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use dnscheck_domain::LookupResultSet;
use tracing::{debug, info};

use crate::{
    dto::{LookupCreatedResponse, LookupRequest},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/lookups", post(create_lookup))
        .route("/api/lookups/{key}", get(get_lookup))
}

async fn create_lookup(
    State(state): State<AppState>,
    Json(req): Json<LookupRequest>,
) -> Result<(StatusCode, Json<LookupCreatedResponse>), ApiError> {
    let submitted = state
        .submit_lookup
        .execute(&req.hosts.to_raw(), &req.record_type, &req.resolvers)
        .await?;

    info!(
        key = %submitted.key,
        group = %req.resolvers,
        queries = submitted.results.query_count(),
        "Lookup created"
    );

    Ok((
        StatusCode::CREATED,
        Json(LookupCreatedResponse {
            key: submitted.key,
            queries: submitted.results.query_count(),
        }),
    ))
}

async fn get_lookup(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<LookupResultSet>, ApiError> {
    let results = state.get_lookup.execute(&key).await?;
    debug!(key = %key, queries = results.query_count(), "Lookup retrieved");
    Ok(Json(results))
}
