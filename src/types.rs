//! Core data model: per-URL fetch results and the analysis batch
//!
//! A [`FetchResult`] is in exactly one of two shapes: a full success record
//! with every content field populated, or a failure record carrying only the
//! URL and an error description. The `untagged` serde representation encodes
//! this directly — a success record never carries an `error` key and a
//! failure record never carries content fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel used when a page has no title element
pub const NO_TITLE: &str = "No Title";

/// Sentinel used when a page has no description meta tag
pub const NO_DESCRIPTION: &str = "No Description";

/// Heading text extracted from a page, grouped by level
///
/// Both sequences preserve document order and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Headings {
    /// Text of every `<h1>` element, in document order
    pub h1: Vec<String>,
    /// Text of every `<h2>` element, in document order
    pub h2: Vec<String>,
}

/// Successful analysis of a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageReport {
    /// The originally requested URL (correlation key)
    pub url: String,

    /// Text of the first `<title>` element, or [`NO_TITLE`]
    pub title: String,

    /// `content` attribute of the first `<meta name="description">`,
    /// or [`NO_DESCRIPTION`]
    pub meta_description: String,

    /// h1/h2 heading text in document order
    pub headings: Headings,

    /// Count of whitespace-delimited tokens in the page text
    pub word_count: u64,

    /// Count of anchor (`<a>`) elements anywhere in the document
    pub links_count: u64,
}

/// Failed fetch or parse of a single page
///
/// Carries only the URL and a human-readable failure description; no content
/// fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FetchFailure {
    /// The originally requested URL (correlation key)
    pub url: String,

    /// Human-readable description of the failure
    pub error: String,
}

/// Per-URL outcome: either a full [`PageReport`] or a [`FetchFailure`]
///
/// No partial or mixed record exists. The serde representation is untagged,
/// so a success record serializes as a plain object with all content fields
/// and a failure record as `{"url": ..., "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FetchResult {
    /// The page was fetched and analyzed successfully
    Success(PageReport),
    /// The fetch or parse failed; the error text is data, not a propagated error
    Failure(FetchFailure),
}

impl FetchResult {
    /// Build a failure record for `url` with the given error description
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        FetchResult::Failure(FetchFailure {
            url: url.into(),
            error: error.into(),
        })
    }

    /// The originally requested URL, present in both shapes
    pub fn url(&self) -> &str {
        match self {
            FetchResult::Success(report) => &report.url,
            FetchResult::Failure(failure) => &failure.url,
        }
    }

    /// Whether this result is a success record
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    /// The success report, if this result is one
    pub fn as_report(&self) -> Option<&PageReport> {
        match self {
            FetchResult::Success(report) => Some(report),
            FetchResult::Failure(_) => None,
        }
    }

    /// The failure record, if this result is one
    pub fn as_failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchResult::Success(_) => None,
            FetchResult::Failure(failure) => Some(failure),
        }
    }
}

/// Order-preserving collection of [`FetchResult`], one per input URL
///
/// Created once per analysis run and fully populated before being handed to
/// the sink; the i-th result corresponds to the i-th input URL even though
/// fetches run concurrently. Serializes transparently as a JSON array, so the
/// structured artifact round-trips back into an equal batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AnalysisBatch(Vec<FetchResult>);

impl AnalysisBatch {
    /// Build a batch from results already in input order
    pub fn from_results(results: Vec<FetchResult>) -> Self {
        Self(results)
    }

    /// The results, in input order
    pub fn results(&self) -> &[FetchResult] {
        &self.0
    }

    /// Number of results in the batch
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the batch contains no results
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the results in input order
    pub fn iter(&self) -> std::slice::Iter<'_, FetchResult> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AnalysisBatch {
    type Item = &'a FetchResult;
    type IntoIter = std::slice::Iter<'a, FetchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> PageReport {
        PageReport {
            url: "https://good.example".to_string(),
            title: "Acme".to_string(),
            meta_description: NO_DESCRIPTION.to_string(),
            headings: Headings {
                h1: vec!["Welcome".to_string()],
                h2: vec![],
            },
            word_count: 50,
            links_count: 3,
        }
    }

    #[test]
    fn test_success_record_has_no_error_key() {
        let result = FetchResult::Success(sample_report());
        let json = serde_json::to_value(&result).unwrap();

        let object = json.as_object().unwrap();
        assert!(object.get("error").is_none());
        assert_eq!(object["url"], "https://good.example");
        assert_eq!(object["title"], "Acme");
        assert_eq!(object["word_count"], 50);
        assert_eq!(object["links_count"], 3);
        assert_eq!(object["headings"]["h1"][0], "Welcome");
    }

    #[test]
    fn test_failure_record_has_exactly_url_and_error() {
        let result = FetchResult::failure("https://down.example", "connection timed out");
        let json = serde_json::to_value(&result).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["url"], "https://down.example");
        assert_eq!(object["error"], "connection timed out");
    }

    #[test]
    fn test_untagged_round_trip_success() {
        let original = FetchResult::Success(sample_report());
        let json = serde_json::to_string(&original).unwrap();
        let parsed: FetchResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
        assert!(parsed.is_success());
        assert!(parsed.as_report().is_some());
    }

    #[test]
    fn test_untagged_round_trip_failure() {
        let original = FetchResult::failure("https://down.example", "DNS lookup failed");
        let json = serde_json::to_string(&original).unwrap();
        let parsed: FetchResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, original);
        assert!(!parsed.is_success());
        assert_eq!(parsed.as_failure().unwrap().error, "DNS lookup failed");
    }

    #[test]
    fn test_url_accessor_covers_both_shapes() {
        let success = FetchResult::Success(sample_report());
        let failure = FetchResult::failure("https://down.example", "boom");

        assert_eq!(success.url(), "https://good.example");
        assert_eq!(failure.url(), "https://down.example");
    }

    #[test]
    fn test_batch_serializes_as_plain_array() {
        let batch = AnalysisBatch::from_results(vec![
            FetchResult::Success(sample_report()),
            FetchResult::failure("https://down.example", "boom"),
        ]);
        let json = serde_json::to_value(&batch).unwrap();

        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert!(array[0].get("title").is_some());
        assert!(array[1].get("error").is_some());
    }

    #[test]
    fn test_empty_batch_round_trips() {
        let batch = AnalysisBatch::default();
        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(json, "[]");

        let parsed: AnalysisBatch = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_empty());
    }
}
