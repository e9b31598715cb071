use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Body rendered for a missing entity on update or delete.
pub const NOT_FOUND_BODY: &str = "Can not find such data.";
/// Body rendered when the path id disagrees with the body id.
pub const ID_MISMATCH_BODY: &str = "The ids are different.";

/// HTTP rendering of `ServiceError`. Both `NotFound` and
/// `IdentityMismatch` collapse to 404 with fixed plain-text bodies;
/// clients cannot tell them apart by status, only by message.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::NotFound => {
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
            }
            ServiceError::IdentityMismatch => {
                (StatusCode::NOT_FOUND, ID_MISMATCH_BODY).into_response()
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, "persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": msg})),
                )
                    .into_response()
            }
        }
    }
}
