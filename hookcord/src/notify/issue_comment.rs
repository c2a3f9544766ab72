//! `issue_comment` event formatting.

use chrono::{DateTime, Utc};

use crate::github::IssueCommentEvent;
use crate::notify::notification::{truncate, Color, Notification};

const BODY_LIMIT: usize = 300;

pub fn format_issue_comment(event: &IssueCommentEvent, now: DateTime<Utc>) -> Notification {
    let issue = &event.issue;
    let comment = &event.comment;

    // GitHub reports pull request comments as issue comments.
    let (emoji, kind) = if issue.is_pull_request() {
        ("💬", "Pull Request")
    } else {
        ("📝", "Issue")
    };

    Notification {
        title: format!(
            "{} Comment {} in {}",
            emoji, event.action, event.repository.name
        ),
        description: format!(
            "**{}** {} a comment on {} #{}\n\n{}",
            comment.user.login,
            event.action,
            kind.to_lowercase(),
            issue.number,
            truncate(&comment.body, BODY_LIMIT)
        ),
        color: Color::Gray,
        url: comment.html_url.to_string(),
        timestamp: now,
        fields: Vec::new(),
        footer: Some(format!("{} #{}: {}", kind, issue.number, issue.title)),
    }
}
