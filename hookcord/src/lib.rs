//! Hookcord - GitHub to Discord webhook relay.
//!
//! Receives signed GitHub webhook deliveries, turns the supported events into
//! Discord embeds and posts them to a Discord incoming webhook.
//!
//! ## Architecture
//!
//! ```text
//! GitHub → web (verify signature) → notify (route + format) → delivery worker → Discord
//! ```

pub mod config;
pub mod delivery;
pub mod discord;
pub mod github;
pub mod notify;
pub mod web;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use config::Config;
pub use delivery::{DeliveryJob, DeliveryObserver, Dispatcher, TracingObserver};
pub use discord::{DeliveryError, DiscordClient};
pub use github::{EventKind, GitHubEvent};
pub use notify::{route, Notification, Routed};
pub use web::{router, AppState};
