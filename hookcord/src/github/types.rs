//! Payload types for the GitHub events the relay understands.
//!
//! Only the fields the formatters read are declared. Required fields are
//! plain types so a payload missing one fails to deserialize; fields GitHub
//! sends as `null` are `Option`.

use serde::de::IgnoredAny;
use serde::Deserialize;
use url::Url;

// =============================================================================
// Shared Types
// =============================================================================

/// A GitHub account (user, bot or organization).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
}

/// The repository an event happened in.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: Url,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Kind of git reference created by a `create` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    Branch,
    Tag,
}

impl RefType {
    pub fn as_str(self) -> &'static str {
        match self {
            RefType::Branch => "branch",
            RefType::Tag => "tag",
        }
    }
}

/// Only the `action` field of a payload.
///
/// Read before the full payload so filtered actions never depend on the
/// rest of the payload's shape.
#[derive(Debug, Deserialize)]
pub struct ActionEnvelope {
    #[serde(default)]
    pub action: Option<String>,
}

// =============================================================================
// push
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: String,
    pub after: String,
    pub pusher: Pusher,
    pub repository: Repository,
    #[serde(default)]
    pub commits: Option<Vec<Commit>>,
}

impl PushEvent {
    pub fn commits(&self) -> &[Commit] {
        self.commits.as_deref().unwrap_or_default()
    }

    /// Branch name with the `refs/heads/` prefix removed.
    pub fn branch(&self) -> String {
        self.git_ref.replacen("refs/heads/", "", 1)
    }
}

/// The pusher is a git identity, not an account, so it carries a name.
#[derive(Debug, Clone, Deserialize)]
pub struct Pusher {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    pub url: Url,
    pub message: String,
}

impl Commit {
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

// =============================================================================
// pull_request
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: Url,
    pub user: User,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub merged: Option<bool>,
    pub head: BranchRef,
    pub base: BranchRef,
    pub additions: u64,
    pub deletions: u64,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub git_ref: String,
}

// =============================================================================
// issue_comment
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub comment: Comment,
    pub issue: Issue,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub body: String,
    pub html_url: Url,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// Present only when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<IgnoredAny>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

// =============================================================================
// repository
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryEvent {
    pub action: String,
    pub repository: Repository,
    pub sender: User,
}

// =============================================================================
// create
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: RefType,
    pub repository: Repository,
    pub sender: User,
}

// =============================================================================
// release
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEvent {
    pub action: String,
    pub release: Release,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: Url,
    pub prerelease: bool,
    pub author: User,
}

impl Release {
    /// Release name, or the tag when the release is unnamed.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.tag_name)
    }
}
