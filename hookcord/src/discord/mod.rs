//! Discord incoming-webhook support.
//!
//! This module provides:
//! - The embed message format Discord expects
//! - An HTTP client that posts a notification as one embed

pub mod client;
pub mod types;

pub use client::{DeliveryError, DiscordClient};
pub use types::{Embed, EmbedField, EmbedFooter, WebhookMessage};
