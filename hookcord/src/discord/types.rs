//! Discord incoming-webhook message format.
//!
//! Reference: https://discord.com/developers/docs/resources/webhook#execute-webhook

use chrono::SecondsFormat;
use serde::Serialize;

use crate::notify::{Field, Notification};

/// Body of an execute-webhook request.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

impl WebhookMessage {
    /// Wrap a notification as a single-embed message.
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            embeds: vec![Embed::from(notification)],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub url: String,
    /// ISO-8601 timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl From<&Field> for EmbedField {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            inline: field.inline,
        }
    }
}

impl From<&Notification> for Embed {
    fn from(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            description: notification.description.clone(),
            color: notification.color.rgb(),
            url: notification.url.clone(),
            timestamp: notification
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            fields: notification.fields.iter().map(EmbedField::from).collect(),
            footer: notification
                .footer
                .as_ref()
                .map(|text| EmbedFooter { text: text.clone() }),
        }
    }
}
