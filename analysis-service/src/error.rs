//! Failures of the analyze operation and their HTTP mapping.

use crate::dtos::ErrorResponse;
use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Body is not a JSON object.
    #[error("Invalid JSON")]
    InvalidRequest,

    /// `text` is absent, not a string, or blank.
    #[error("No text provided.")]
    MissingField,

    /// Body exceeds the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// The completion call failed; the upstream message is relayed verbatim.
    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

impl AnalysisError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::InvalidRequest | AnalysisError::MissingField => StatusCode::BAD_REQUEST,
            AnalysisError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AnalysisError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Outcome label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidRequest => "invalid_request",
            AnalysisError::MissingField => "missing_field",
            AnalysisError::PayloadTooLarge => "payload_too_large",
            AnalysisError::Upstream(_) => "upstream_failure",
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
