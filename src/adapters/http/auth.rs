//! Shared-secret gate in front of every route.

use super::router::AppState;
use crate::adapters::http::error::ApiError;
use crate::domain::DomainError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware that rejects requests without the configured secret.
///
/// When no secret is configured (or it is empty), all requests pass through.
pub async fn require_shared_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(secret) = state.shared_secret.as_deref().filter(|s| !s.is_empty()) else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if provided == secret {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "rejected request without valid API key");
    ApiError::from(DomainError::Unauthorized).into_response()
}
