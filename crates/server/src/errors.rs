use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::Envelope;

pub const MISSING_CAT_ID: &str = "Parameter ':catId' can not be empty";

/// Handler-level failure: an HTTP status plus the message placed in the
/// `FAILED` envelope.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn missing_cat_id() -> Self {
        Self::bad_request(MISSING_CAT_ID)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        // Not-found stays 400 for compatibility with existing clients.
        let status = match e {
            ServiceError::Validation(_) | ServiceError::Conflict(_) | ServiceError::NotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(Envelope::failed(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ServiceError::duplicate_name("Tom"), StatusCode::BAD_REQUEST),
            (ServiceError::cat_not_found("1"), StatusCode::BAD_REQUEST),
            (ServiceError::storage("disk"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let msg = err.to_string();
            let api: ApiError = err.into();
            assert_eq!(api.status, status);
            assert_eq!(api.message, msg);
        }
    }

    #[test]
    fn response_uses_failed_envelope() {
        let resp = ApiError::missing_cat_id().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
