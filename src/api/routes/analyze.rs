//! Analysis trigger handler

use crate::api::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// URLs to fetch and analyze, in the order results should appear
    ///
    /// Defaulted so a body without the key is handled by the empty-list
    /// validation below instead of a deserialization rejection.
    #[serde(default)]
    pub urls: Vec<String>,
}

/// Success body for `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Human-readable completion message
    pub message: String,

    /// Number of result records in the batch (one per requested URL)
    pub records: usize,

    /// Path of the JSON artifact written by this run
    pub json_path: String,

    /// Path of the CSV artifact written by this run
    pub csv_path: String,
}

/// POST /analyze - Run a full analysis for the supplied URLs
///
/// Blocks until every fetch has finished and both artifacts are written.
/// Per-URL fetch failures do not fail the request; they appear as failure
/// records in the artifacts.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed and artifacts written", body = AnalyzeResponse),
        (status = 400, description = "Missing or empty URL list", body = crate::error::ApiError),
        (status = 500, description = "Artifacts could not be written", body = crate::error::ApiError)
    )
)]
pub async fn trigger_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    // Validate before any fetch work
    if request.urls.is_empty() {
        return crate::Error::InvalidRequest("No URLs provided".to_string()).into_response();
    }

    match state.analyzer.run_urls(&request.urls).await {
        Ok(artifacts) => Json(AnalyzeResponse {
            message: "Analysis completed successfully".to_string(),
            records: request.urls.len(),
            json_path: artifacts.json_path.display().to_string(),
            csv_path: artifacts.csv_path.display().to_string(),
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
