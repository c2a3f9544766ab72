//! Web server module for handling inbound GitHub webhooks.
//!
//! This module provides a thin web server that:
//! - Receives webhooks from GitHub
//! - Verifies the HMAC signature
//! - Formats supported events and queues them for Discord
//! - Returns a fixed-shape JSON response

pub mod handlers;
pub mod signature;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use handlers::{github_webhook, handle_panic, health, AppState, HealthResponse, WebhookResponse};
pub use signature::{compute_signature, verify_signature};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/github-webhook", post(github_webhook))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
