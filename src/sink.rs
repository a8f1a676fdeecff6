//! Result persistence: JSON and CSV artifacts
//!
//! Every run writes the same two deterministically-named files into the
//! output directory, overwriting the previous run's artifacts. The JSON file
//! is the structured record collection and round-trips back into an
//! [`AnalysisBatch`]; the CSV file is a flat tabular view for spreadsheet
//! tooling.
//!
//! CSV flattening contract: the header always carries the full column set
//! (`url,title,meta_description,headings,word_count,links_count,error`);
//! fields absent from a record render as empty cells, and the nested
//! `headings` structure is stored as a JSON string inside its cell. Exact
//! round-trip fidelity of the CSV is explicitly not a goal — the JSON
//! artifact is the canonical one.

use crate::types::{AnalysisBatch, FetchResult};
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed name of the structured-record artifact
pub const JSON_FILENAME: &str = "site_analysis.json";

/// Fixed name of the tabular artifact
pub const CSV_FILENAME: &str = "site_analysis.csv";

const CSV_HEADER: &str = "url,title,meta_description,headings,word_count,links_count,error";

/// Paths of the two artifacts written by a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    /// Path of the JSON artifact
    pub json_path: PathBuf,
    /// Path of the CSV artifact
    pub csv_path: PathBuf,
}

/// Write both artifacts for a batch into `output_dir`
///
/// Serializes the batch as pretty-printed JSON, then as CSV. Fails with an
/// I/O error if the directory is missing or unwritable. Writing is
/// best-effort two-file: the JSON is written first, and a CSV failure is
/// reported to the caller rather than leaving the run looking complete.
///
/// Saving is idempotent — the same batch produces byte-identical artifacts,
/// with no timestamps or nondeterministic ordering in either file.
pub async fn save_batch(batch: &AnalysisBatch, output_dir: &Path) -> Result<SavedArtifacts> {
    let json_path = output_dir.join(JSON_FILENAME);
    let json = serde_json::to_string_pretty(batch)?;
    tokio::fs::write(&json_path, json).await?;

    let csv_path = output_dir.join(CSV_FILENAME);
    tokio::fs::write(&csv_path, render_csv(batch)?).await?;

    info!(
        json = %json_path.display(),
        csv = %csv_path.display(),
        records = batch.len(),
        "Analysis results saved"
    );

    Ok(SavedArtifacts {
        json_path,
        csv_path,
    })
}

/// Render a batch as CSV text with the fixed column set
fn render_csv(batch: &AnalysisBatch) -> Result<String> {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for result in batch {
        let row = match result {
            FetchResult::Success(report) => [
                csv_field(&report.url),
                csv_field(&report.title),
                csv_field(&report.meta_description),
                csv_field(&serde_json::to_string(&report.headings)?),
                report.word_count.to_string(),
                report.links_count.to_string(),
                String::new(),
            ],
            FetchResult::Failure(failure) => [
                csv_field(&failure.url),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                csv_field(&failure.error),
            ],
        };
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    Ok(csv)
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
