//! Router construction, shared between production startup and tests.

use super::{auth, handlers};
use crate::ports::MessagingPort;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub messaging: Arc<dyn MessagingPort>,
    pub shared_secret: Option<String>,
}

impl AppState {
    pub fn new(messaging: Arc<dyn MessagingPort>, shared_secret: Option<String>) -> Self {
        Self {
            messaging,
            shared_secret,
        }
    }
}

/// Build the API router. The shared-secret gate covers every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/send", post(handlers::send))
        .route("/broadcast", post(handlers::broadcast))
        .route("/inbound", post(handlers::inbound))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_shared_secret,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
