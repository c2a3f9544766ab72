//! `repository` event formatting.

use chrono::{DateTime, Utc};

use crate::github::RepositoryEvent;
use crate::notify::notification::{Color, Field, Notification};

pub fn format_repository(event: &RepositoryEvent, now: DateTime<Utc>) -> Notification {
    let repo = &event.repository;

    let (emoji, color) = match event.action.as_str() {
        "created" => ("🆕", Color::Green),
        "deleted" => ("🗑️", Color::Red),
        _ => ("📁", Color::Blue),
    };

    let mut description = format!(
        "**{}** {} repository **{}**",
        event.sender.login, event.action, repo.name
    );
    if let Some(text) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        description.push_str("\n\n");
        description.push_str(text);
    }

    let fields = repo
        .language
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(|language| vec![Field::inline("Language", language)])
        .unwrap_or_default();

    Notification {
        title: format!("{} Repository {}", emoji, event.action),
        description,
        color,
        url: repo.html_url.to_string(),
        timestamp: now,
        fields,
        footer: None,
    }
}
