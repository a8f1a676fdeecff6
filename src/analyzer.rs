//! Batch orchestration: concurrent fan-out, ordered fan-in, persistence
//!
//! [`SiteAnalyzer`] is the main service object. It owns the shared HTTP
//! client (via [`Fetcher`]) and the configuration, fans a batch of URLs out
//! into concurrent fetches, and hands the collected results to the sink.

use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::sink::{SavedArtifacts, save_batch};
use crate::types::AnalysisBatch;
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Coordinates fetching, aggregation, and persistence for analysis runs
///
/// Construction creates the output directory if needed and builds the shared
/// HTTP client. The analyzer is cheap to share behind an `Arc` — it holds no
/// mutable state between runs.
///
/// # Example
///
/// ```no_run
/// use site_analyzer::{Config, SiteAnalyzer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut config = Config::default();
///     config.analysis.urls = vec!["https://example.com".to_string()];
///
///     let analyzer = SiteAnalyzer::new(config)?;
///     let artifacts = analyzer.run().await?;
///     println!("results in {}", artifacts.json_path.display());
///     Ok(())
/// }
/// ```
pub struct SiteAnalyzer {
    /// Shared configuration (read-only after construction)
    pub config: Arc<Config>,
    fetcher: Fetcher,
}

impl SiteAnalyzer {
    /// Create an analyzer, building the HTTP client and the output directory
    pub fn new(config: Config) -> Result<Self> {
        std::fs::create_dir_all(&config.analysis.output_dir)?;
        let fetcher = Fetcher::new(&config.analysis)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    /// Fetch and analyze all URLs concurrently
    ///
    /// Launches one fetch per URL with no concurrency cap, all sharing the
    /// analyzer's HTTP client, and waits for every one to finish. The
    /// returned batch preserves input order — `join_all` yields results in
    /// the order the futures were given, not completion order — and one
    /// URL's failure never affects its siblings. This method cannot fail:
    /// per-URL failures are recorded in the batch itself.
    pub async fn analyze(&self, urls: &[String]) -> AnalysisBatch {
        let fetches = urls.iter().map(|url| self.fetcher.fetch(url));
        let results = futures::future::join_all(fetches).await;
        AnalysisBatch::from_results(results)
    }

    /// Run the full fetch → save pipeline for the configured URL list
    ///
    /// This is the entry point used by scheduled and direct invocation.
    pub async fn run(&self) -> Result<SavedArtifacts> {
        let urls = self.config.analysis.urls.clone();
        self.run_urls(&urls).await
    }

    /// Run the full fetch → save pipeline for an explicit URL list
    ///
    /// Used by the API trigger, which carries its own URLs. Blocks until both
    /// artifacts are written; sink failures propagate to the caller.
    pub async fn run_urls(&self, urls: &[String]) -> Result<SavedArtifacts> {
        info!(url_count = urls.len(), "Starting site analysis");

        let batch = self.analyze(urls).await;
        let failed = batch.iter().filter(|r| !r.is_success()).count();
        let artifacts = save_batch(&batch, &self.config.analysis.output_dir).await?;

        info!(
            url_count = urls.len(),
            failed,
            "Site analysis completed"
        );
        Ok(artifacts)
    }
}
