//! Hookcord web server.
//!
//! This binary:
//! - Receives GitHub webhooks on `POST /github-webhook`
//! - Verifies the `X-Hub-Signature-256` HMAC signature
//! - Posts supported events to Discord as embeds
//!
//! Deliveries still queued at shutdown are flushed before the process exits.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hookcord::{router, AppState, Config, DiscordClient, Dispatcher, TracingObserver};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        webhook_secret_configured = config.webhook_secret.is_some(),
        discord_webhook_configured = config.discord_webhook_url.is_some(),
        request_timeout_ms = config.request_timeout_ms,
        max_body_bytes = config.max_body_bytes,
        "config_loaded"
    );

    if config.webhook_secret.is_none() {
        warn!("SECRET_KEY is not set; webhook requests will fail with 500");
    }
    if config.discord_webhook_url.is_none() {
        warn!("DISCORD_WEBHOOK_URL is not set; webhook requests will fail with 500");
    }

    // Start the delivery worker
    let client =
        DiscordClient::new(config.request_timeout()).context("Failed to create HTTP client")?;
    let (dispatcher, worker) = Dispatcher::spawn(client, Arc::new(TracingObserver));

    // Create application state and router
    let port = config.port;
    let app = router(AppState::new(config, dispatcher));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router and every dispatcher are gone; wait for queued deliveries.
    info!("delivery_worker_draining");
    worker.await.context("Delivery worker failed")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
