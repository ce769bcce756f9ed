use crate::dto::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dnscheck_domain::DomainError;
use tracing::error;

/// Maps domain errors onto HTTP responses with a JSON `{error}` body.
///
/// Input errors and missing keys echo their message; everything else is
/// logged and answered with a generic 500.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DomainError::InputError(msg) => (StatusCode::BAD_REQUEST, msg),
            DomainError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            e @ (DomainError::IntegrityError(_) | DomainError::StorageError(_)) => {
                error!(error = %e, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
