//! Webhook endpoint handlers.
//!
//! The GitHub handler:
//! 1. Checks the shared secret is configured
//! 2. Verifies the signature against the raw body
//! 3. Routes the event to its formatter
//! 4. Queues the notification for delivery and returns
//!
//! The response never depends on whether Discord accepted the message.

use std::any::Any;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::delivery::{DeliveryJob, Dispatcher};
use crate::github::{X_GITHUB_EVENT, X_HUB_SIGNATURE_256};
use crate::notify::{route, Routed};
use crate::web::signature::verify_signature;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

// =============================================================================
// GitHub Webhook
// =============================================================================

/// Webhook response. Exactly one of the two fields is set.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl WebhookResponse {
    pub fn message(message: &'static str) -> Self {
        Self {
            message: Some(message),
            error: None,
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            message: None,
            error: Some(error),
        }
    }
}

pub const MISSING_SECRET: &str = "Missing SECRET_KEY environment variable";
pub const INVALID_SIGNATURE: &str = "Invalid secret key";
pub const MISSING_EVENT: &str = "Missing X-GitHub-Event header";
pub const MISSING_DISCORD_URL: &str = "Missing DISCORD_WEBHOOK_URL environment variable";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const EVENT_NOT_SUPPORTED: &str = "Event not supported";
pub const NO_ACTION_TAKEN: &str = "No action taken";
pub const PROCESSED: &str = "Webhook processed successfully";

fn reply(status: StatusCode, body: WebhookResponse) -> (StatusCode, Json<WebhookResponse>) {
    (status, Json(body))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// GitHub webhook endpoint.
///
/// The body is taken as raw bytes so the signature is checked against
/// exactly what GitHub signed.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    // An empty header counts as missing.
    let event_type = header_str(&headers, X_GITHUB_EVENT).filter(|e| !e.is_empty());
    let delivery_id = header_str(&headers, "X-GitHub-Delivery").unwrap_or("unknown");

    info!(
        event = ?event_type,
        delivery_id = %delivery_id,
        body_length = body.len(),
        has_signature = headers.contains_key(X_HUB_SIGNATURE_256),
        "github_webhook_received"
    );

    let Some(secret) = state.config.webhook_secret.as_deref() else {
        error!("webhook_secret_not_configured");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            WebhookResponse::error(MISSING_SECRET),
        );
    };

    if !verify_signature(secret, &body, header_str(&headers, X_HUB_SIGNATURE_256)) {
        warn!(delivery_id = %delivery_id, "github_signature_invalid");
        return reply(
            StatusCode::UNAUTHORIZED,
            WebhookResponse::error(INVALID_SIGNATURE),
        );
    }

    let Some(event_type) = event_type else {
        warn!(delivery_id = %delivery_id, "github_event_header_missing");
        return reply(
            StatusCode::BAD_REQUEST,
            WebhookResponse::error(MISSING_EVENT),
        );
    };

    let Some(webhook_url) = state.config.discord_webhook_url.as_deref() else {
        error!("discord_webhook_url_not_configured");
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            WebhookResponse::error(MISSING_DISCORD_URL),
        );
    };

    let notification = match route(event_type, &body, Utc::now()) {
        Ok(Routed::Notify(notification)) => notification,
        Ok(Routed::Unsupported) => {
            info!(event = %event_type, delivery_id = %delivery_id, "github_event_unhandled");
            return reply(StatusCode::OK, WebhookResponse::message(EVENT_NOT_SUPPORTED));
        }
        Ok(Routed::Ignored { action }) => {
            info!(
                event = %event_type,
                action = ?action,
                delivery_id = %delivery_id,
                "github_event_no_action"
            );
            return reply(StatusCode::OK, WebhookResponse::message(NO_ACTION_TAKEN));
        }
        Err(e) => {
            error!(
                event = %event_type,
                delivery_id = %delivery_id,
                error = %e,
                "github_webhook_processing_failed"
            );
            return reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                WebhookResponse::error(INTERNAL_ERROR),
            );
        }
    };

    let title = notification.title.clone();
    let job = DeliveryJob {
        webhook_url: webhook_url.to_string(),
        notification,
    };

    // Delivery is best-effort; a stopped worker does not change the response.
    if let Err(e) = state.dispatcher.dispatch(job) {
        error!(title = %title, error = %e, "notification_dispatch_failed");
    } else {
        info!(
            event = %event_type,
            delivery_id = %delivery_id,
            title = %title,
            "notification_dispatched"
        );
    }

    reply(StatusCode::OK, WebhookResponse::message(PROCESSED))
}

/// Turn a panic inside a handler into the generic 500 response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!(panic = %detail, "request_handler_panicked");

    reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        WebhookResponse::error(INTERNAL_ERROR),
    )
    .into_response()
}
