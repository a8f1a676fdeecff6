//! Error types for site-analyzer
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (config, I/O, network, serialization)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes
//!
//! Note that per-URL fetch failures are *not* errors in this taxonomy: they
//! are absorbed into [`crate::types::FetchResult`] as data and never cross the
//! fetcher boundary. The variants here cover the failures that do propagate:
//! sink I/O, serialization, request validation, and server startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for site-analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for site-analyzer
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_dir")
        key: Option<String>,
    },

    /// I/O error (unwritable output directory, failed artifact write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network or HTTP client error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Fetch exceeded the configured timeout
    #[error("timed out fetching {url} after {seconds} seconds")]
    Timeout {
        /// The URL whose fetch timed out
        url: String,
        /// The configured timeout that was exceeded
        seconds: u64,
    },

    /// Non-success HTTP status received for a page fetch
    #[error("HTTP error {status} fetching {url}")]
    HttpStatus {
        /// The non-success status code returned by the server
        status: u16,
        /// The URL that returned the error status
        url: String,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid API request (e.g., missing or empty URL list)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
/// It follows a standard format with machine-readable error codes,
/// human-readable messages, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "invalid_request",
///     "message": "invalid request: no URLs provided"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "invalid_request", "io_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create an "unauthorized" error (used by the API key middleware)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("unauthorized", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::InvalidRequest(_) => 400,

            // 502 Bad Gateway - Upstream fetch failures. These normally never
            // reach the API (they are captured as failure records), but the
            // mapping exists for completeness.
            Error::Network(_) => 502,
            Error::Timeout { .. } => 502,
            Error::HttpStatus { .. } => 502,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Network(_) => "network_error",
            Error::Timeout { .. } => "fetch_timeout",
            Error::HttpStatus { .. } => "http_status_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            Error::HttpStatus { status, url } => Some(serde_json::json!({
                "status": status,
                "url": url,
            })),
            Error::Timeout { url, seconds } => Some(serde_json::json!({
                "url": url,
                "timeout_seconds": seconds,
            })),
            _ => None,
        };

        match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        }
    }
}
