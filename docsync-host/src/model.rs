//! Wire shapes of the GitHub REST v3 resources docsync reads and writes.
//!
//! Only the fields docsync uses are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

use docsync_core::RepoName;

/// A repository as returned by `GET /repos/{owner}/{repo}` and `POST …/forks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub full_name: RepoName,
    /// HTTPS git transport URL (`https://github.com/o/r.git`).
    pub clone_url: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Present on forks when the full repository is fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,
}

fn default_branch() -> String {
    "master".to_owned()
}

/// One side (`head` or `base`) of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitPointer {
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub sha: String,
    /// `None` when the source repository of the PR has been deleted.
    pub repo: Option<Repository>,
}

/// A pull request as returned by `GET /repos/{owner}/{repo}/pulls/{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub head: CommitPointer,
    pub base: CommitPointer,
}

/// An entry of `GET /repos/{owner}/{repo}/pulls/{n}/files`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestFile {
    pub filename: String,
}

/// `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    /// `<owner>:<branch>` for cross-repository pull requests.
    pub head: String,
    pub base: String,
    pub body: String,
}

/// Response of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Response of `POST /repos/{owner}/{repo}/issues/{n}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comment {
    pub id: u64,
    pub html_url: String,
}
