//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. The full internal error is
//! logged server side; the client only receives `{"error": <message>}` with
//! the fixed message of the error's category.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgrelay_core::{ErrorMetadata, LogLevel, PublishError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper type for PublishError to implement IntoResponse
/// (orphan rule: both the trait and PublishError are foreign here)
#[derive(Debug)]
pub struct HttpAppError(pub PublishError);

impl From<PublishError> for HttpAppError {
    fn from(err: PublishError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &PublishError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(error);

        (
            status,
            Json(ErrorResponse {
                error: error.client_message(),
            }),
        )
            .into_response()
    }
}
