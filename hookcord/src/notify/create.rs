//! `create` event formatting (new branch or tag).

use chrono::{DateTime, Utc};

use crate::github::{CreateEvent, RefType};
use crate::notify::notification::{Color, Notification};

pub fn format_create(event: &CreateEvent, now: DateTime<Utc>) -> Notification {
    let (emoji, label) = match event.ref_type {
        RefType::Branch => ("🌿", "Branch"),
        RefType::Tag => ("🏷️", "Tag"),
    };

    Notification {
        title: format!("{} {} created in {}", emoji, label, event.repository.name),
        description: format!(
            "**{}** created {} `{}`",
            event.sender.login,
            event.ref_type.as_str(),
            event.git_ref
        ),
        color: Color::Green,
        url: event.repository.html_url.to_string(),
        timestamp: now,
        fields: Vec::new(),
        footer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn format(payload: serde_json::Value) -> Notification {
        let event: CreateEvent = serde_json::from_value(payload).unwrap();
        format_create(&event, Utc::now())
    }

    #[test]
    fn test_branch_created() {
        let notification = format(fixtures::create("branch", "feature/login"));

        assert_eq!(notification.title, "🌿 Branch created in hello-world");
        assert_eq!(
            notification.description,
            "**octocat** created branch `feature/login`"
        );
        assert_eq!(notification.color, Color::Green);
        assert_eq!(notification.url, fixtures::REPO_URL);
    }

    #[test]
    fn test_tag_created() {
        let notification = format(fixtures::create("tag", "v1.4.0"));

        assert_eq!(notification.title, "🏷️ Tag created in hello-world");
        assert_eq!(notification.description, "**octocat** created tag `v1.4.0`");
    }
}
