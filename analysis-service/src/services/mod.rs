pub mod analyzer;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod report;

pub use analyzer::ContentAnalyzer;
pub use metrics::{get_metrics, init_metrics};
