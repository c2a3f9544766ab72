//! GitHub webhook event types.
//!
//! Maps the `X-GitHub-Event` header onto the event kinds the relay handles
//! and decodes the raw body into the matching typed payload.

pub mod types;

pub use types::{
    ActionEnvelope, BranchRef, Comment, Commit, CreateEvent, Issue, IssueCommentEvent,
    PullRequest, PullRequestEvent, PushEvent, Pusher, RefType, Release, ReleaseEvent, Repository,
    RepositoryEvent, User,
};

/// Header carrying the event type.
pub const X_GITHUB_EVENT: &str = "X-GitHub-Event";

/// Header carrying the `sha256=` payload signature.
pub const X_HUB_SIGNATURE_256: &str = "X-Hub-Signature-256";

const PULL_REQUEST_ACTIONS: &[&str] = &["opened", "closed", "reopened"];
const ISSUE_COMMENT_ACTIONS: &[&str] = &["created"];
const REPOSITORY_ACTIONS: &[&str] = &["created", "deleted"];
const RELEASE_ACTIONS: &[&str] = &["published", "created"];

/// Event types the relay turns into notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    IssueComment,
    Repository,
    Create,
    Release,
}

impl EventKind {
    /// Look up the kind for an `X-GitHub-Event` header value.
    ///
    /// Returns `None` for event types the relay does not handle, such as
    /// `ping`.
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "push" => Some(EventKind::Push),
            "pull_request" => Some(EventKind::PullRequest),
            "issue_comment" => Some(EventKind::IssueComment),
            "repository" => Some(EventKind::Repository),
            "create" => Some(EventKind::Create),
            "release" => Some(EventKind::Release),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::IssueComment => "issue_comment",
            EventKind::Repository => "repository",
            EventKind::Create => "create",
            EventKind::Release => "release",
        }
    }

    /// Actions that produce a notification, or `None` when every delivery of
    /// this kind does.
    pub fn allowed_actions(self) -> Option<&'static [&'static str]> {
        match self {
            EventKind::Push | EventKind::Create => None,
            EventKind::PullRequest => Some(PULL_REQUEST_ACTIONS),
            EventKind::IssueComment => Some(ISSUE_COMMENT_ACTIONS),
            EventKind::Repository => Some(REPOSITORY_ACTIONS),
            EventKind::Release => Some(RELEASE_ACTIONS),
        }
    }

    /// Whether a delivery with `action` passes this kind's action filter.
    pub fn accepts(self, action: Option<&str>) -> bool {
        match self.allowed_actions() {
            None => true,
            Some(allowed) => action.is_some_and(|a| allowed.contains(&a)),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded webhook payload.
#[derive(Debug, Clone)]
pub enum GitHubEvent {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
    IssueComment(IssueCommentEvent),
    Repository(RepositoryEvent),
    Create(CreateEvent),
    Release(ReleaseEvent),
}

impl GitHubEvent {
    /// Decode `body` as the payload for `kind`.
    pub fn from_slice(kind: EventKind, body: &[u8]) -> Result<Self, serde_json::Error> {
        let event = match kind {
            EventKind::Push => GitHubEvent::Push(serde_json::from_slice(body)?),
            EventKind::PullRequest => GitHubEvent::PullRequest(serde_json::from_slice(body)?),
            EventKind::IssueComment => GitHubEvent::IssueComment(serde_json::from_slice(body)?),
            EventKind::Repository => GitHubEvent::Repository(serde_json::from_slice(body)?),
            EventKind::Create => GitHubEvent::Create(serde_json::from_slice(body)?),
            EventKind::Release => GitHubEvent::Release(serde_json::from_slice(body)?),
        };
        Ok(event)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            GitHubEvent::Push(_) => EventKind::Push,
            GitHubEvent::PullRequest(_) => EventKind::PullRequest,
            GitHubEvent::IssueComment(_) => EventKind::IssueComment,
            GitHubEvent::Repository(_) => EventKind::Repository,
            GitHubEvent::Create(_) => EventKind::Create,
            GitHubEvent::Release(_) => EventKind::Release,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_known_events() {
        for kind in [
            EventKind::Push,
            EventKind::PullRequest,
            EventKind::IssueComment,
            EventKind::Repository,
            EventKind::Create,
            EventKind::Release,
        ] {
            assert_eq!(EventKind::from_header(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_from_header_unknown_events() {
        assert_eq!(EventKind::from_header("ping"), None);
        assert_eq!(EventKind::from_header("issues"), None);
        assert_eq!(EventKind::from_header("Push"), None);
        assert_eq!(EventKind::from_header(""), None);
    }

    #[test]
    fn test_action_filters() {
        assert!(EventKind::Push.accepts(None));
        assert!(EventKind::Create.accepts(Some("anything")));

        assert!(EventKind::PullRequest.accepts(Some("opened")));
        assert!(EventKind::PullRequest.accepts(Some("closed")));
        assert!(EventKind::PullRequest.accepts(Some("reopened")));
        assert!(!EventKind::PullRequest.accepts(Some("labeled")));
        assert!(!EventKind::PullRequest.accepts(None));

        assert!(EventKind::IssueComment.accepts(Some("created")));
        assert!(!EventKind::IssueComment.accepts(Some("edited")));

        assert!(EventKind::Repository.accepts(Some("deleted")));
        assert!(!EventKind::Repository.accepts(Some("archived")));

        assert!(EventKind::Release.accepts(Some("published")));
        assert!(EventKind::Release.accepts(Some("created")));
        assert!(!EventKind::Release.accepts(Some("prereleased")));
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        assert!(GitHubEvent::from_slice(EventKind::Push, b"not json").is_err());
    }

    #[test]
    fn test_from_slice_create() {
        let body = br#"{
            "ref": "v1.2.0",
            "ref_type": "tag",
            "repository": { "name": "hello", "html_url": "https://github.com/octo/hello" },
            "sender": { "login": "octocat" }
        }"#;

        let event = GitHubEvent::from_slice(EventKind::Create, body).unwrap();
        assert_eq!(event.kind(), EventKind::Create);
        match event {
            GitHubEvent::Create(create) => {
                assert_eq!(create.ref_type, RefType::Tag);
                assert_eq!(create.git_ref, "v1.2.0");
            }
            _ => panic!("Expected Create variant"),
        }
    }
}
