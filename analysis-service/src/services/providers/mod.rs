//! Completion provider abstractions and implementations.
//!
//! The analysis pipeline talks to the language model through the
//! [`CompletionProvider`] trait so the OpenAI backend can be swapped for the
//! mock in tests.

pub mod mock;
pub mod openai;

pub use mock::MockCompletionProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
///
/// Every variant displays as the bare upstream message so callers can relay
/// it unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Unauthorized(_) => "unauthorized",
            ProviderError::Network(_) => "network",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Api { status, .. } if *status == 429 => "rate_limited",
            ProviderError::Api { .. } => "api",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// A single chat message sent to the completion API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request. Serializes directly into the OpenAI wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Text of the first choice, untrimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one chat completion.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Whether credentials are present. Does not touch the network.
    fn is_configured(&self) -> bool;

    /// Provider name used in logs and metric labels.
    fn name(&self) -> &'static str;
}
