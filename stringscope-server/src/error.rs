use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stringscope::StoreError;
use tracing::{error, warn};

/// Wraps a [`StoreError`] so handlers can return it directly
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(StoreError::invalid_input(msg))
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            StoreError::Conflict(_) => (
                StatusCode::CONFLICT,
                "String already exists in the system".to_string(),
            ),
            StoreError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "String does not exist in the system".to_string(),
            ),
            StoreError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Unparseable(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            StoreError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
