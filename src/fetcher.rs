//! Single-page fetching and signal extraction
//!
//! The fetcher performs one bounded-timeout HTTP GET per URL and converts
//! every possible outcome — page content, network failure, timeout, or an
//! error status — into a [`FetchResult`]. Failures never escape this module
//! as errors; they are data in the batch.

use crate::config::AnalysisConfig;
use crate::page::{HeadingLevel, PageDocument};
use crate::types::{FetchResult, Headings, NO_DESCRIPTION, NO_TITLE, PageReport};
use crate::{Error, Result};
use std::time::Duration;
use tracing::{debug, error};

/// Fetches pages and extracts descriptive signals from them
///
/// One fetcher (and its underlying `reqwest::Client`) is shared across all
/// concurrent fetches of a batch; the client is never mutated after
/// construction.
pub struct Fetcher {
    client: reqwest::Client,
    timeout_secs: u64,
    analyze_error_pages: bool,
}

impl Fetcher {
    /// Create a fetcher from the analysis configuration
    ///
    /// The configured timeout covers the whole request: connection setup and
    /// reading the response body.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            timeout_secs: config.fetch_timeout_secs,
            analyze_error_pages: config.analyze_error_pages,
        })
    }

    /// Fetch and analyze a single page
    ///
    /// Always returns a [`FetchResult`]: a success record with all content
    /// fields, or a failure record carrying the URL and a description of what
    /// went wrong. This method has no side effects beyond the network call.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.try_fetch(url).await {
            Ok(report) => {
                debug!(
                    url,
                    word_count = report.word_count,
                    links_count = report.links_count,
                    "Page analyzed"
                );
                FetchResult::Success(report)
            }
            Err(e) => {
                error!(url, error = %e, "Page fetch failed");
                FetchResult::failure(url, e.to_string())
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<PageReport> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    url: url.to_string(),
                    seconds: self.timeout_secs,
                }
            } else {
                Error::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() && !self.analyze_error_pages {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    url: url.to_string(),
                    seconds: self.timeout_secs,
                }
            } else {
                Error::Network(e)
            }
        })?;

        // Parse and extract in one non-async block: the document type is not
        // Send and must not be held across an await point.
        let doc = PageDocument::parse(&body);
        Ok(PageReport {
            url: url.to_string(),
            title: doc.title().unwrap_or_else(|| NO_TITLE.to_string()),
            meta_description: doc
                .meta_description()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            headings: Headings {
                h1: doc.headings(HeadingLevel::H1),
                h2: doc.headings(HeadingLevel::H2),
            },
            word_count: doc.word_count(),
            links_count: doc.links_count(),
        })
    }
}
