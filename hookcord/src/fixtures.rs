//! Sample GitHub payloads shared by the unit tests.

use serde_json::{json, Value};

pub const REPO_URL: &str = "https://github.com/octo-org/hello-world";

pub fn repository() -> Value {
    json!({
        "id": 1296269,
        "name": "hello-world",
        "full_name": "octo-org/hello-world",
        "html_url": REPO_URL,
        "description": "My first repository",
        "language": "Rust"
    })
}

pub fn push(commit_count: usize) -> Value {
    let commits: Vec<Value> = (0..commit_count)
        .map(|i| {
            let id = format!("c{:06x}{}", i + 1, "0".repeat(33));
            json!({
                "id": id,
                "url": format!("{}/commit/{}", REPO_URL, id),
                "message": format!("Commit number {}\n\nDetails for commit {}", i + 1, i + 1),
                "author": { "name": "Mona", "email": "mona@example.com" }
            })
        })
        .collect();

    json!({
        "ref": "refs/heads/main",
        "before": "6113728f27ae82c7b1a177c8d03f9e96e0adf246",
        "after": "0d1a26e67d8f5eaf1f6ba5c57fc3c7d91ac0fd1c",
        "pusher": { "name": "mona", "email": "mona@example.com" },
        "sender": { "login": "mona" },
        "repository": repository(),
        "commits": commits
    })
}

pub fn pull_request(action: &str, merged: bool, body: Option<&str>) -> Value {
    json!({
        "action": action,
        "number": 42,
        "pull_request": {
            "number": 42,
            "html_url": format!("{}/pull/42", REPO_URL),
            "title": "Add feature",
            "user": { "login": "mona" },
            "body": body,
            "merged": merged,
            "head": { "ref": "feature/login", "sha": "abc" },
            "base": { "ref": "main", "sha": "def" },
            "additions": 120,
            "deletions": 7
        },
        "repository": repository(),
        "sender": { "login": "mona" }
    })
}

pub fn issue_comment(action: &str, body: &str, on_pull_request: bool) -> Value {
    let mut issue = json!({
        "number": 7,
        "title": "Crash on startup",
        "html_url": format!("{}/issues/7", REPO_URL)
    });
    if on_pull_request {
        issue["pull_request"] = json!({ "url": format!("{}/pull/7", REPO_URL) });
    }

    json!({
        "action": action,
        "issue": issue,
        "comment": {
            "id": 1,
            "body": body,
            "html_url": format!("{}/issues/7#issuecomment-1", REPO_URL),
            "user": { "login": "hubot" }
        },
        "repository": repository(),
        "sender": { "login": "hubot" }
    })
}

pub fn repository_event(action: &str, language: Option<&str>) -> Value {
    let mut repo = repository();
    repo["language"] = json!(language);
    json!({
        "action": action,
        "repository": repo,
        "sender": { "login": "octocat" }
    })
}

pub fn create(ref_type: &str, git_ref: &str) -> Value {
    json!({
        "ref": git_ref,
        "ref_type": ref_type,
        "master_branch": "main",
        "repository": repository(),
        "sender": { "login": "octocat" }
    })
}

pub fn release(action: &str, name: Option<&str>, body: Option<&str>, prerelease: bool) -> Value {
    json!({
        "action": action,
        "release": {
            "name": name,
            "tag_name": "v1.4.0",
            "body": body,
            "html_url": format!("{}/releases/tag/v1.4.0", REPO_URL),
            "prerelease": prerelease,
            "author": { "login": "octocat" }
        },
        "repository": repository(),
        "sender": { "login": "octocat" }
    })
}
