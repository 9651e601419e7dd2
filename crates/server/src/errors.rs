use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Handler-boundary error: maps service failures to a status and `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.0.to_string();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %msg, "request rejected");
        }
        let body = match self.0 {
            ServiceError::Validation(details) if details.len() > 1 => ErrorBody::with_details(msg, details),
            _ => ErrorBody::new(msg),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
