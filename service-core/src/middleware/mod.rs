//! HTTP middleware shared by the workspace services.

pub mod metrics;
pub mod security_headers;
pub mod tracing;
