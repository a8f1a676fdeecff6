//! # site-analyzer
//!
//! Backend library for periodic and on-demand website analysis.
//!
//! Fetches a set of web pages concurrently, extracts descriptive signals
//! (title, meta description, headings, word count, link count), and writes
//! the aggregated results as deterministic JSON and CSV artifacts.
//!
//! ## Design Philosophy
//!
//! site-analyzer is designed to be:
//! - **Failure-isolating** - One unreachable URL never spoils the batch;
//!   failures are recorded as data alongside successes
//! - **Deterministic** - Result order matches input order, and the same batch
//!   always produces byte-identical artifacts
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding;
//!   the REST API and scheduler are opt-in tasks the embedder spawns
//! - **Sensible defaults** - Works out of the box with zero configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use site_analyzer::{Config, SiteAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.analysis.urls = vec![
//!         "https://example.com".to_string(),
//!         "https://example.org".to_string(),
//!     ];
//!
//!     let analyzer = SiteAnalyzer::new(config)?;
//!     let artifacts = analyzer.run().await?;
//!
//!     println!("wrote {}", artifacts.json_path.display());
//!     Ok(())
//! }
//! ```
//!
//! To run the analysis on a schedule and expose the REST trigger, spawn the
//! scheduler task and the API server on the same analyzer:
//!
//! ```no_run
//! use site_analyzer::{Config, SiteAnalyzer};
//! use site_analyzer::scheduler_task::SchedulerTask;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let analyzer = Arc::new(SiteAnalyzer::new(config)?);
//!
//! let task = SchedulerTask::new(analyzer.clone());
//! tokio::spawn(task.run());
//!
//! site_analyzer::api::start_api_server(analyzer.clone(), analyzer.config.clone()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch orchestration
pub mod analyzer;
/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Page fetching and signal extraction
pub mod fetcher;
/// Parsed-document queries
pub mod page;
/// Scheduled analysis runs
pub mod scheduler_task;
/// Result persistence (JSON + CSV artifacts)
pub mod sink;
/// Core result types
pub mod types;

// Re-export commonly used types
pub use analyzer::SiteAnalyzer;
pub use config::{AnalysisConfig, ApiConfig, Config, ScheduleConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use fetcher::Fetcher;
pub use scheduler_task::SchedulerTask;
pub use sink::{SavedArtifacts, save_batch};
pub use types::{
    AnalysisBatch, FetchFailure, FetchResult, Headings, NO_DESCRIPTION, NO_TITLE, PageReport,
};
