use crate::dtos::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AnalysisError;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};

/// Largest accepted `/analyze` body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// `POST /analyze`
///
/// The body is read as raw bytes so malformed JSON and a missing
/// `Content-Type` get the service's own error envelope. Body rejections
/// (oversized or unreadable) are mapped into the same envelope.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalyzeResponse>, AnalysisError> {
    let outcome = match body {
        Ok(body) => run_analysis(&state, &body).await,
        Err(rejection) => Err(body_rejection(rejection)),
    };

    match &outcome {
        Ok(_) => metrics::record_analysis_request("success"),
        Err(e) => {
            if !matches!(e, AnalysisError::Upstream(_)) {
                tracing::warn!(error = %e, "Rejected analyze request");
            }
            metrics::record_analysis_request(e.kind());
        }
    }

    outcome.map(|result| Json(AnalyzeResponse { result }))
}

fn body_rejection(rejection: BytesRejection) -> AnalysisError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalysisError::PayloadTooLarge
    } else {
        AnalysisError::InvalidRequest
    }
}

async fn run_analysis(state: &AppState, body: &[u8]) -> Result<String, AnalysisError> {
    let request = AnalyzeRequest::from_body(body)?;
    Ok(state.analyzer.analyze(&request.text).await?)
}

/// `OPTIONS /analyze`: empty 200 so browser preflights never reach the
/// analysis path.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
