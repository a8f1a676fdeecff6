//! API key authentication middleware
//!
//! When [`ApiConfig::api_key`](crate::config::ApiConfig::api_key) is set,
//! every request must carry a matching `X-Api-Key` header; anything else is
//! rejected with a 401 and the crate's standard [`ApiError`] body.

use crate::error::ApiError;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Middleware that gates all routes behind the configured API key
///
/// Layered with `middleware::from_fn_with_state(config.api.api_key.clone(), ..)`
/// by [`create_router`](crate::api::create_router); a `None` state lets every
/// request through, so the layer is harmless when auth is not configured.
pub async fn require_api_key(
    State(expected_key): State<Option<String>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected_key) = expected_key else {
        return next.run(request).await;
    };

    let provided_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    match provided_key {
        Some(key) if keys_match(key.as_bytes(), expected_key.as_bytes()) => {
            next.run(request).await
        }
        Some(_) => reject("Invalid API key"),
        None => reject("Missing X-Api-Key header"),
    }
}

/// Compares keys in constant time so a mismatch does not leak how much of
/// the key was correct. All bytes are always examined.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn reject(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError::unauthorized(message)),
    )
        .into_response()
}
