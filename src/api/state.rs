//! Application state for the API server

use crate::{Config, SiteAnalyzer};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and provides
/// access to the analyzer instance and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The shared SiteAnalyzer instance
    pub analyzer: Arc<SiteAnalyzer>,

    /// Configuration (read access; the analyzer holds its own copy)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(analyzer: Arc<SiteAnalyzer>, config: Arc<Config>) -> Self {
        Self { analyzer, config }
    }
}
