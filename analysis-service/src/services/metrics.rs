//! Prometheus metrics for analysis-service.
//!
//! HTTP request metrics are recorded through the `metrics` facade by the
//! shared middleware and rendered by the installed Prometheus recorder. The
//! analysis-specific series live in a dedicated `prometheus` registry and are
//! appended to the same exposition.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static ANALYSIS_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static ANALYSIS_CONFIDENCE_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static UPSTREAM_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static UPSTREAM_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }

    let registry = Registry::new();

    let requests = IntCounterVec::new(
        Opts::new(
            "analysis_requests_total",
            "Total /analyze requests by outcome",
        ),
        &["outcome"],
    );
    let confidence = IntCounterVec::new(
        Opts::new(
            "analysis_confidence_total",
            "Completed analyses by reported confidence",
        ),
        &["confidence"],
    );
    let latency = HistogramVec::new(
        HistogramOpts::new(
            "analysis_upstream_latency_seconds",
            "Completion API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    );
    let errors = IntCounterVec::new(
        Opts::new(
            "analysis_upstream_errors_total",
            "Total completion API errors",
        ),
        &["provider", "error_type"],
    );
    let tokens = IntCounterVec::new(
        Opts::new("analysis_upstream_tokens_total", "Total tokens processed"),
        &["model", "type"], // type: input, output
    );

    let (requests, confidence, latency, errors, tokens) =
        match (requests, confidence, latency, errors, tokens) {
            (Ok(r), Ok(c), Ok(l), Ok(e), Ok(t)) => (r, c, l, e, t),
            _ => {
                tracing::error!("Failed to create analysis metrics");
                return;
            }
        };

    let registered = [
        registry.register(Box::new(requests.clone())),
        registry.register(Box::new(confidence.clone())),
        registry.register(Box::new(latency.clone())),
        registry.register(Box::new(errors.clone())),
        registry.register(Box::new(tokens.clone())),
    ];
    if let Some(Err(e)) = registered.into_iter().find(Result::is_err) {
        tracing::error!(error = %e, "Failed to register analysis metrics");
        return;
    }

    let _ = REGISTRY.set(registry);
    let _ = ANALYSIS_REQUESTS_TOTAL.set(requests);
    let _ = ANALYSIS_CONFIDENCE_TOTAL.set(confidence);
    let _ = UPSTREAM_LATENCY_SECONDS.set(latency);
    let _ = UPSTREAM_ERRORS_TOTAL.set(errors);
    let _ = UPSTREAM_TOKENS_TOTAL.set(tokens);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            output.push_str("# Metrics registry not initialized\n");
            return output;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        output.push_str(&format!("# Failed to encode metrics: {}\n", e));
        return output;
    }

    match String::from_utf8(buffer) {
        Ok(s) => output.push_str(&s),
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            output.push_str(&format!("# Failed to convert metrics to UTF-8: {}\n", e));
        }
    }

    output
}

// Helper functions for recording metrics

/// Record the outcome of one /analyze request.
pub fn record_analysis_request(outcome: &str) {
    if let Some(counter) = ANALYSIS_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record the confidence the model reported.
pub fn record_confidence(confidence: &str) {
    if let Some(counter) = ANALYSIS_CONFIDENCE_TOTAL.get() {
        counter.with_label_values(&[confidence]).inc();
    }
}

/// Record completion API latency.
pub fn record_upstream_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = UPSTREAM_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a completion API error.
pub fn record_upstream_error(provider: &str, error_type: &str) {
    if let Some(counter) = UPSTREAM_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

/// Record token usage.
pub fn record_tokens(model: &str, input_tokens: u64, output_tokens: u64) {
    if let Some(counter) = UPSTREAM_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[model, "input"])
            .inc_by(input_tokens);
        counter
            .with_label_values(&[model, "output"])
            .inc_by(output_tokens);
    }
}
