//! Route handlers for the REST API

pub mod analyze;
pub mod system;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, trigger_analysis};
pub use system::{health_check, openapi_spec};
