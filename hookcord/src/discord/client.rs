//! HTTP client for posting messages to a Discord webhook.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use super::types::WebhookMessage;
use crate::notify::Notification;

/// Longest slice of an error response body kept for diagnostics.
const ERROR_BODY_PREVIEW: usize = 200;

/// Errors delivering a message to Discord.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request to Discord failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Discord responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl DeliveryError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DeliveryError::Request(e) if e.is_timeout())
    }
}

/// Posts notifications as Discord embeds.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
}

impl DiscordClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// POST `notification` to `webhook_url` as a single embed.
    pub async fn send(
        &self,
        webhook_url: &str,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        let message = WebhookMessage::from_notification(notification);

        let response = self.client.post(webhook_url).json(&message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            return Err(DeliveryError::Status { status, body });
        }

        info!(
            status_code = status.as_u16(),
            title = %notification.title,
            "discord_message_sent"
        );

        Ok(())
    }
}
