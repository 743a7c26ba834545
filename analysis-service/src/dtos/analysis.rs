use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    /// Parse and validate a raw request body.
    ///
    /// The body must be a JSON object. Its `text` member must be a string that
    /// is not blank; the text itself is kept untrimmed.
    pub fn from_body(body: &[u8]) -> Result<Self, AnalysisError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| AnalysisError::InvalidRequest)?;
        let object = value.as_object().ok_or(AnalysisError::InvalidRequest)?;

        match object.get("text").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => Ok(Self {
                text: text.to_string(),
            }),
            _ => Err(AnalysisError::MissingField),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
