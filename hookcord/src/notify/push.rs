//! `push` event formatting.

use chrono::{DateTime, Utc};

use crate::github::PushEvent;
use crate::notify::notification::{Color, Notification};

/// Commits listed individually before the rest are summarized.
pub const MAX_LISTED_COMMITS: usize = 5;

const SHORT_SHA_LEN: usize = 7;

/// Summarize a push: branch, pusher, commit count and the first few commits,
/// linking to the before/after compare view.
pub fn format_push(event: &PushEvent, now: DateTime<Utc>) -> Notification {
    let commits = event.commits();
    let branch = event.branch();

    let mut description = format!(
        "**{}** pushed {} commit(s) to `{}`",
        event.pusher.name,
        commits.len(),
        branch
    );

    if !commits.is_empty() {
        description.push_str("\n\n**Commits:**\n");
        for commit in commits.iter().take(MAX_LISTED_COMMITS) {
            description.push_str(&format!(
                "• [`{}`]({}) {}\n",
                short_sha(&commit.id),
                commit.url,
                commit.title()
            ));
        }

        if commits.len() > MAX_LISTED_COMMITS {
            description.push_str(&format!(
                "... and {} more commits",
                commits.len() - MAX_LISTED_COMMITS
            ));
        }
    }

    let compare_url = format!(
        "{}/compare/{}...{}",
        event.repository.html_url.as_str().trim_end_matches('/'),
        short_sha(&event.before),
        short_sha(&event.after)
    );

    Notification {
        title: format!("📤 Push to {}", event.repository.name),
        description,
        color: Color::Green,
        url: compare_url,
        timestamp: now,
        fields: Vec::new(),
        footer: Some(format!("Branch: {}", branch)),
    }
}

fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((cut, _)) => &sha[..cut],
        None => sha,
    }
}
