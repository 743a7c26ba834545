//! Application startup and lifecycle management.
//!
//! Wires the completion provider into the analyzer, builds the HTTP router
//! with the shared middleware stack, and serves it until a shutdown signal.

use crate::config::AnalysisConfig;
use crate::handlers::{
    analyze::{analyze, preflight, MAX_BODY_BYTES},
    health::{health_check, readiness_check, root_status},
    metrics::metrics_endpoint,
};
use crate::services::providers::{CompletionProvider, OpenAiProvider};
use crate::services::ContentAnalyzer;
use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware, tracing::REQUEST_ID_HEADER,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ContentAnalyzer>,
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/analyze", post(analyze).options(preflight))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        // Route layer so the matched path is available as a metric label
        .route_layer(from_fn(metrics_middleware))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        // Any origin may call the API. Browser callers are not authenticated.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the OpenAI provider from `config`.
    pub async fn build(config: AnalysisConfig) -> Result<Self, AppError> {
        let provider = OpenAiProvider::new(config.openai.clone()).map_err(|e| {
            tracing::error!("Failed to initialize OpenAI provider: {}", e);
            AppError::InternalError(anyhow::anyhow!(e))
        })?;

        if !provider.is_configured() {
            tracing::warn!(
                "OPENAI_API_KEY not configured - analyze requests will fail with an authentication error"
            );
        }

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: AnalysisConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        tracing::info!(
            provider = provider.name(),
            model = %config.analysis.model,
            prompt_variant = %config.analysis.prompt_variant,
            "Initialized completion provider"
        );

        let state = AppState {
            analyzer: Arc::new(ContentAnalyzer::new(provider, config.analysis.clone())),
        };

        // Port 0 = random port for testing
        let addr = config.common.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Analysis service: HTTP on {}:{}", addr.ip(), port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
