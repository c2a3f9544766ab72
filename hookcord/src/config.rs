//! Configuration module for environment variable parsing.
//!
//! The shared secret and Discord URL are optional at startup. When either is
//! missing the server still boots and answers webhook requests with a 500, so
//! a misconfigured deployment is visible to GitHub's delivery log.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// GitHub caps webhook payloads at 25 MiB.
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret used to sign GitHub webhook deliveries
    pub webhook_secret: Option<String>,

    /// Discord incoming-webhook URL notifications are posted to
    pub discord_webhook_url: Option<String>,

    /// Timeout for the outbound Discord request in milliseconds
    pub request_timeout_ms: u64,

    /// Maximum accepted size of an inbound webhook body
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 8080),

            webhook_secret: non_empty(env::var("SECRET_KEY").ok()),

            discord_webhook_url: non_empty(env::var("DISCORD_WEBHOOK_URL").ok()),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 10_000),

            max_body_bytes: parse_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        }
    }

    /// Build a configuration with the two required values and defaults for
    /// everything else.
    pub fn new(webhook_secret: impl Into<String>, discord_webhook_url: impl Into<String>) -> Self {
        Config {
            port: 8080,
            webhook_secret: non_empty(Some(webhook_secret.into())),
            discord_webhook_url: non_empty(Some(discord_webhook_url.into())),
            request_timeout_ms: 10_000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

// Both values are credentials: the secret signs payloads and the Discord URL
// carries its own token.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<REDACTED>");
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("webhook_secret", &redact(&self.webhook_secret))
            .field("discord_webhook_url", &redact(&self.discord_webhook_url))
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

/// Treat empty values as unset. Whitespace is a legitimate secret.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when it is unset or invalid.
fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}
