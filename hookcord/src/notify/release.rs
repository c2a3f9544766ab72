//! `release` event formatting.

use chrono::{DateTime, Utc};

use crate::github::ReleaseEvent;
use crate::notify::notification::{truncate, Color, Field, Notification};

const NOTES_LIMIT: usize = 400;

pub fn format_release(event: &ReleaseEvent, now: DateTime<Utc>) -> Notification {
    let release = &event.release;

    let notes = match release.body.as_deref() {
        Some(body) if !body.is_empty() => truncate(body, NOTES_LIMIT),
        _ => "No release notes provided".to_string(),
    };

    Notification {
        title: format!("🚀 Release {} in {}", event.action, event.repository.name),
        description: format!(
            "**{}** {} release **{}**\n\n{}",
            release.author.login,
            event.action,
            release.display_name(),
            notes
        ),
        color: Color::Blue,
        url: release.html_url.to_string(),
        timestamp: now,
        fields: vec![
            Field::inline("Tag", release.tag_name.as_str()),
            Field::inline("Prerelease", if release.prerelease { "Yes" } else { "No" }),
        ],
        footer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn format(payload: serde_json::Value) -> Notification {
        let event: ReleaseEvent = serde_json::from_value(payload).unwrap();
        format_release(&event, Utc::now())
    }

    #[test]
    fn test_published_release() {
        let notification = format(fixtures::release(
            "published",
            Some("Spring release"),
            Some("Bug fixes"),
            false,
        ));

        assert_eq!(notification.title, "🚀 Release published in hello-world");
        assert_eq!(
            notification.description,
            "**octocat** published release **Spring release**\n\nBug fixes"
        );
        assert_eq!(
            notification.fields,
            vec![
                Field::inline("Tag", "v1.4.0"),
                Field::inline("Prerelease", "No"),
            ]
        );
        assert_eq!(notification.color, Color::Blue);
    }

    #[test]
    fn test_prerelease_flag() {
        let notification = format(fixtures::release("created", None, None, true));

        assert_eq!(notification.fields[1], Field::inline("Prerelease", "Yes"));
    }

    #[test]
    fn test_unnamed_release_uses_tag_and_placeholder() {
        let notification = format(fixtures::release("published", None, None, false));

        assert_eq!(
            notification.description,
            "**octocat** published release **v1.4.0**\n\nNo release notes provided"
        );
    }

    #[test]
    fn test_notes_truncated_to_400_characters() {
        let notes = "n".repeat(401);
        let notification = format(fixtures::release("published", Some("Big"), Some(&notes), false));

        assert!(notification
            .description
            .ends_with(&format!("\n\n{}...", "n".repeat(400))));
    }
}
