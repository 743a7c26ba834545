//! Content analysis: prompt construction and the single completion call.

use crate::config::AnalysisSettings;
use crate::services::metrics;
use crate::services::prompt::build_prompt;
use crate::services::providers::{
    ChatMessage, CompletionProvider, CompletionRequest, ProviderError,
};
use crate::services::report::AnalysisReport;
use std::sync::Arc;
use std::time::Instant;

pub struct ContentAnalyzer {
    provider: Arc<dyn CompletionProvider>,
    settings: AnalysisSettings,
}

impl ContentAnalyzer {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: AnalysisSettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// The completion request sent for `text`.
    pub fn build_request(&self, text: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(
                self.settings.prompt_variant,
                text,
            ))],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Run the analysis and return the model's trimmed answer.
    pub async fn analyze(&self, text: &str) -> Result<String, ProviderError> {
        let request = self.build_request(text);
        let provider = self.provider.name();

        let start = Instant::now();
        let outcome = self.provider.complete(&request).await;
        metrics::record_upstream_latency(provider, &request.model, start.elapsed().as_secs_f64());

        let response = outcome.map_err(|e| {
            tracing::error!(
                provider,
                model = %request.model,
                error_type = e.kind(),
                error = %e,
                "Completion request failed"
            );
            metrics::record_upstream_error(provider, e.kind());
            e
        })?;

        if let Some(usage) = response.usage {
            metrics::record_tokens(&request.model, usage.prompt_tokens, usage.completion_tokens);
        }

        let answer = response.content.trim().to_string();
        let report = AnalysisReport::parse(&answer);
        metrics::record_confidence(report.confidence.as_str());

        tracing::info!(
            provider,
            model = %request.model,
            text_len = text.len(),
            flag_count = report.flags.len(),
            explanation_len = report.explanation.len(),
            confidence = %report.confidence,
            "Analysis completed"
        );

        Ok(answer)
    }
}
