//! Event routing and formatting.
//!
//! Turns a raw webhook body into a [`Notification`], or decides the delivery
//! needs no notification.
//!
//! ## Routing Flow
//!
//! ```text
//! body → JSON check → X-GitHub-Event → EventKind → action filter → typed payload → format_*() → Notification
//! ```

pub mod create;
pub mod issue_comment;
pub mod notification;
pub mod pull_request;
pub mod push;
pub mod release;
pub mod repository;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use thiserror::Error;
use tracing::info;

use crate::github::{ActionEnvelope, EventKind, GitHubEvent};

pub use create::format_create;
pub use issue_comment::format_issue_comment;
pub use notification::{truncate, Color, Field, Notification, ELLIPSIS};
pub use pull_request::format_pull_request;
pub use push::format_push;
pub use release::format_release;
pub use repository::format_repository;

/// Outcome of routing one webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// The event type is not one the relay handles.
    Unsupported,
    /// The event type is handled but this action is filtered out.
    Ignored { action: Option<String> },
    /// A notification should be forwarded.
    Notify(Notification),
}

/// Errors raised while decoding a payload.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("invalid {event} payload: {source}")]
    InvalidPayload {
        event: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Route a webhook delivery to its formatter.
///
/// The body must be JSON whatever the event type. Unknown event types and
/// filtered actions are not errors. A payload that does not match the schema
/// of a handled event is.
pub fn route(event_type: &str, body: &[u8], now: DateTime<Utc>) -> Result<Routed, FormatError> {
    serde_json::from_slice::<IgnoredAny>(body).map_err(FormatError::InvalidJson)?;

    let Some(kind) = EventKind::from_header(event_type) else {
        info!(event = %event_type, "event_unsupported");
        return Ok(Routed::Unsupported);
    };

    let invalid = |source: serde_json::Error| FormatError::InvalidPayload {
        event: kind,
        source,
    };

    if kind.allowed_actions().is_some() {
        let envelope: ActionEnvelope = serde_json::from_slice(body).map_err(invalid)?;
        if !kind.accepts(envelope.action.as_deref()) {
            info!(
                event = %kind,
                action = ?envelope.action,
                "event_action_ignored"
            );
            return Ok(Routed::Ignored {
                action: envelope.action,
            });
        }
    }

    let event = GitHubEvent::from_slice(kind, body).map_err(invalid)?;
    let notification = format_event(&event, now);

    info!(
        event = %kind,
        title = %notification.title,
        "event_formatted"
    );

    Ok(Routed::Notify(notification))
}

/// Format an already decoded event.
pub fn format_event(event: &GitHubEvent, now: DateTime<Utc>) -> Notification {
    match event {
        GitHubEvent::Push(e) => format_push(e, now),
        GitHubEvent::PullRequest(e) => format_pull_request(e, now),
        GitHubEvent::IssueComment(e) => format_issue_comment(e, now),
        GitHubEvent::Repository(e) => format_repository(e, now),
        GitHubEvent::Create(e) => format_create(e, now),
        GitHubEvent::Release(e) => format_release(e, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn route_value(event_type: &str, payload: serde_json::Value) -> Result<Routed, FormatError> {
        let body = serde_json::to_vec(&payload).unwrap();
        route(event_type, &body, Utc::now())
    }

    #[test]
    fn test_unknown_event_is_unsupported() {
        let routed = route_value("ping", serde_json::json!({ "zen": "Design for failure." }));
        assert_eq!(routed.unwrap(), Routed::Unsupported);
    }

    #[test]
    fn test_unknown_event_still_requires_json() {
        let err = route("ping", b"not json at all", Utc::now()).unwrap_err();
        assert!(matches!(err, FormatError::InvalidJson(_)));
    }

    #[test]
    fn test_filtered_action_is_ignored() {
        let routed = route_value(
            "pull_request",
            fixtures::pull_request("labeled", false, None),
        );
        assert_eq!(
            routed.unwrap(),
            Routed::Ignored {
                action: Some("labeled".to_string())
            }
        );
    }

    #[test]
    fn test_filtered_action_skips_payload_validation() {
        // Only the action is read for filtered deliveries.
        let routed = route_value(
            "issue_comment",
            serde_json::json!({ "action": "deleted" }),
        );
        assert!(matches!(routed.unwrap(), Routed::Ignored { .. }));
    }

    #[test]
    fn test_missing_action_is_ignored() {
        let routed = route_value("release", serde_json::json!({}));
        assert_eq!(routed.unwrap(), Routed::Ignored { action: None });
    }

    #[test]
    fn test_every_handled_event_notifies() {
        let cases = [
            ("push", fixtures::push(2)),
            ("pull_request", fixtures::pull_request("opened", false, None)),
            ("issue_comment", fixtures::issue_comment("created", "Hi", false)),
            ("repository", fixtures::repository_event("deleted", None)),
            ("create", fixtures::create("branch", "dev")),
            ("release", fixtures::release("published", None, None, false)),
        ];

        for (event_type, payload) in cases {
            let routed = route_value(event_type, payload).unwrap();
            assert!(
                matches!(routed, Routed::Notify(_)),
                "{} should produce a notification",
                event_type
            );
        }
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let mut payload = fixtures::pull_request("opened", false, None);
        payload["pull_request"]
            .as_object_mut()
            .unwrap()
            .remove("user");

        match route_value("pull_request", payload).unwrap_err() {
            FormatError::InvalidPayload { event, .. } => assert_eq!(event, EventKind::PullRequest),
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            route("push", b"{not json", Utc::now()),
            Err(FormatError::InvalidJson(_))
        ));
        assert!(matches!(
            route("pull_request", b"", Utc::now()),
            Err(FormatError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_timestamp_comes_from_caller() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let body = serde_json::to_vec(&fixtures::create("tag", "v1")).unwrap();

        match route("create", &body, now).unwrap() {
            Routed::Notify(notification) => assert_eq!(notification.timestamp, now),
            other => panic!("Expected notification, got {:?}", other),
        }
    }
}
