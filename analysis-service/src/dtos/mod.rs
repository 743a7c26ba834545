pub mod analysis;

pub use analysis::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, StatusResponse};
