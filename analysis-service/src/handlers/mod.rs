//! HTTP handlers for the analysis service.

pub mod analyze;
pub mod health;
pub mod metrics;
