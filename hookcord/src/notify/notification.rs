//! The normalized notification every formatter produces.

use chrono::{DateTime, Utc};

/// Marker appended to text cut at a length limit.
pub const ELLIPSIS: &str = "...";

/// Semantic accent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Success or creation
    Green,
    /// Failure or deletion
    Red,
    /// Merge
    Purple,
    /// Neutral
    Blue,
    /// Comment
    Gray,
}

impl Color {
    /// RGB value as Discord expects it.
    pub const fn rgb(self) -> u32 {
        match self {
            Color::Green => 0x28a745,
            Color::Red => 0xd73a49,
            Color::Purple => 0x6f42c1,
            Color::Blue => 0x0366d6,
            Color::Gray => 0x586069,
        }
    }
}

/// An inline name/value pair shown under the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// A complete, ready-to-send notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub color: Color,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
}

/// Keep the first `limit` characters of `text`, appending [`ELLIPSIS`] when
/// anything was cut.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
