//! Scheduled analysis runs
//!
//! This module provides the background task that re-runs the analysis at a
//! fixed interval. The loop polls roughly once a second so a shutdown request
//! is observed promptly even with multi-hour intervals.
//!
//! # Features
//!
//! - Interval taken from [`ScheduleConfig`](crate::config::ScheduleConfig)
//! - Sub-second reaction to shutdown regardless of interval length
//! - A failed run is logged and skipped; the schedule keeps going
//!
//! # Example
//!
//! ```no_run
//! use site_analyzer::{Config, SiteAnalyzer};
//! use site_analyzer::scheduler_task::SchedulerTask;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let analyzer = Arc::new(SiteAnalyzer::new(config)?);
//!
//! let task = SchedulerTask::new(analyzer.clone());
//! let shutdown = task.shutdown_handle();
//!
//! // Run scheduled analysis (blocks until shutdown)
//! tokio::spawn(async move {
//!     task.run().await;
//! });
//! # Ok(())
//! # }
//! ```

use crate::analyzer::SiteAnalyzer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::{Duration, Instant, sleep};
use tracing::{error, info};

/// Background task that runs the analysis on a fixed interval
///
/// The first run happens one full interval after [`SchedulerTask::run`] is
/// called, not immediately. Callers that want an immediate run invoke
/// [`SiteAnalyzer::run`] themselves before spawning the task.
pub struct SchedulerTask {
    /// Analyzer executed on each tick
    analyzer: Arc<SiteAnalyzer>,

    /// Time between runs
    interval: Duration,

    /// Shutdown flag shared with [`SchedulerTask::shutdown_handle`] holders
    running: Arc<AtomicBool>,
}

impl SchedulerTask {
    /// Creates a scheduler task with the interval from the analyzer's config
    pub fn new(analyzer: Arc<SiteAnalyzer>) -> Self {
        let hours = analyzer.config.schedule.interval_hours;
        Self::with_interval(analyzer, Duration::from_secs(hours * 3600))
    }

    /// Creates a scheduler task with an explicit interval
    ///
    /// Mainly useful for tests and embeddings that want sub-hour schedules.
    pub fn with_interval(analyzer: Arc<SiteAnalyzer>, interval: Duration) -> Self {
        Self {
            analyzer,
            interval,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns a handle that stops the task when flipped to `false`
    ///
    /// The task notices the change within about one poll cycle (one second,
    /// or the interval itself when that is shorter).
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Starts the scheduled loop
    ///
    /// Runs until the shutdown handle is flipped. Each cycle:
    /// 1. Check the shutdown flag
    /// 2. If a full interval has elapsed since the last run, run the analysis
    /// 3. Sleep for the poll period
    ///
    /// A run that fails (for example, an unwritable output directory) is
    /// logged and dropped; the next tick proceeds normally.
    pub async fn run(self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Scheduled analysis started"
        );

        let poll = self.interval.min(Duration::from_secs(1));
        let mut last_run = Instant::now();

        loop {
            if !self.running.load(Ordering::SeqCst) {
                info!("Scheduled analysis shutting down");
                break;
            }

            if last_run.elapsed() >= self.interval {
                if let Err(e) = self.analyzer.run().await {
                    error!(error = %e, "Scheduled analysis run failed");
                }
                last_run = Instant::now();
            }

            sleep(poll).await;
        }

        info!("Scheduled analysis stopped");
    }
}
