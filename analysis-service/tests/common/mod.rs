#![allow(dead_code)]

use analysis_service::config::{AnalysisConfig, AnalysisSettings};
use analysis_service::services::prompt::PromptVariant;
use analysis_service::services::providers::{
    CompletionProvider, MockCompletionProvider, OpenAiConfig, OpenAiProvider, ProviderError,
};
use analysis_service::startup::{build_router, AppState, Application};
use analysis_service::services::ContentAnalyzer;
use axum::Router;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;

pub const FLAGGED_ANSWER: &str =
    "Flags: Unverified Claim\nExplanation: ...\nConfidence: High";

pub fn test_config(openai: OpenAiConfig) -> AnalysisConfig {
    AnalysisConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
        },
        openai,
        analysis: test_settings(),
    }
}

pub fn test_settings() -> AnalysisSettings {
    AnalysisSettings {
        model: "gpt-4".to_string(),
        temperature: 0.2,
        max_tokens: 500,
        prompt_variant: PromptVariant::Standard,
    }
}

pub fn openai_config(base_url: &str, api_key: &str) -> OpenAiConfig {
    OpenAiConfig {
        api_key: Secret::new(api_key.to_string()),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    }
}

/// Router backed by a mock provider, for `oneshot` tests.
pub fn router_with(provider: Arc<dyn CompletionProvider>) -> Router {
    build_router(AppState {
        analyzer: Arc::new(ContentAnalyzer::new(provider, test_settings())),
    })
}

pub fn succeeding(answer: &str) -> Arc<MockCompletionProvider> {
    Arc::new(MockCompletionProvider::succeeding(answer))
}

pub fn failing(error: ProviderError) -> Arc<MockCompletionProvider> {
    Arc::new(MockCompletionProvider::failing(error))
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the real application around `provider`.
    pub async fn spawn(provider: Arc<dyn CompletionProvider>) -> Self {
        let config = test_config(openai_config("http://127.0.0.1:9", ""));
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the application with the real OpenAI provider pointed at
    /// `base_url`.
    pub async fn spawn_with_openai(base_url: &str, api_key: &str) -> Self {
        let config = test_config(openai_config(base_url, api_key));
        let provider = OpenAiProvider::new(config.openai.clone())
            .expect("Failed to create OpenAI provider");
        let app = Application::build_with_provider(config, Arc::new(provider))
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_analyze(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.client
            .post(format!("{}/analyze", self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
