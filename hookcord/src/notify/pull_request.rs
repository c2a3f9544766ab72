//! `pull_request` event formatting.

use chrono::{DateTime, Utc};

use crate::github::PullRequestEvent;
use crate::notify::notification::{truncate, Color, Field, Notification};

const BODY_LIMIT: usize = 200;

pub fn format_pull_request(event: &PullRequestEvent, now: DateTime<Utc>) -> Notification {
    let action = event.action.as_str();
    let pr = &event.pull_request;

    let (emoji, color) = match action {
        "opened" => ("🆕", Color::Green),
        "closed" if pr.is_merged() => ("✅", Color::Purple),
        "closed" => ("❌", Color::Red),
        _ => ("🔀", Color::Blue),
    };

    let body = match pr.body.as_deref() {
        Some(body) if !body.is_empty() => truncate(body, BODY_LIMIT),
        _ => "No description provided".to_string(),
    };

    Notification {
        title: format!(
            "{} Pull Request {} in {}",
            emoji, action, event.repository.name
        ),
        description: format!(
            "**{}** {} pull request #{}\n\n{}",
            pr.user.login, action, pr.number, body
        ),
        color,
        url: pr.html_url.to_string(),
        timestamp: now,
        fields: vec![
            Field::inline(
                "From → To",
                format!("`{}` → `{}`", pr.head.git_ref, pr.base.git_ref),
            ),
            Field::inline("Changes", format!("+{} -{}", pr.additions, pr.deletions)),
        ],
        footer: Some(format!("PR #{}", pr.number)),
    }
}
