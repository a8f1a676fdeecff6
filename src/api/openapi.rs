//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the site-analyzer REST
//! API using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the site-analyzer REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "site-analyzer REST API",
        version = "0.1.0",
        description = "REST API for triggering website analysis runs and monitoring the service",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        crate::api::routes::analyze::trigger_analysis,
        crate::api::routes::system::health_check,
        crate::api::routes::system::openapi_spec,
    ),
    components(schemas(
        // Result types from types.rs
        crate::types::PageReport,
        crate::types::FetchFailure,
        crate::types::FetchResult,
        crate::types::Headings,

        // Request/response bodies
        crate::api::routes::AnalyzeRequest,
        crate::api::routes::AnalyzeResponse,

        // Config types from config.rs
        crate::config::Config,
        crate::config::AnalysisConfig,
        crate::config::ScheduleConfig,
        crate::config::ApiConfig,

        // Error types
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "analysis", description = "Analysis runs"),
        (name = "system", description = "Health and documentation")
    )
)]
pub struct ApiDoc;
