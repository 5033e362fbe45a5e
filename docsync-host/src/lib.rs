//! # docsync-host
//!
//! Access to the remote source-control host.
//!
//! [`RemoteHost`] is the seam the propagation workflow is written against;
//! [`GitHubClient`] implements it over the GitHub REST API. Read operations
//! work anonymously, write operations need a token.

pub mod error;
pub mod github;
pub mod model;

use docsync_core::RepoName;

pub use error::HostError;
pub use github::GitHubClient;
pub use model::{
    Comment, CommitPointer, CreatedPullRequest, NewPullRequest, PullRequest, Repository,
};

/// Operations docsync needs from the remote host.
///
/// Every call goes to the host; nothing is cached.
pub trait RemoteHost {
    /// Whether write operations can succeed.
    fn is_authenticated(&self) -> bool;

    /// Paths of every file changed by the pull request.
    fn pull_request_files(&self, repo: &RepoName, number: u64) -> Result<Vec<String>, HostError>;

    fn pull_request(&self, repo: &RepoName, number: u64) -> Result<PullRequest, HostError>;

    /// The open pull request on `repo` from `head` (`<owner>:<branch>`) onto
    /// `base`, if there is one.
    fn find_open_pull_request(
        &self,
        repo: &RepoName,
        head: &str,
        base: &str,
    ) -> Result<Option<PullRequest>, HostError>;

    fn repository(&self, repo: &RepoName) -> Result<Repository, HostError>;

    /// Login of the authenticated user.
    fn current_user(&self) -> Result<String, HostError>;

    /// Fork `repo` into the authenticated user's account. Returns the existing
    /// fork when there already is one.
    fn fork(&self, repo: &RepoName) -> Result<Repository, HostError>;

    fn create_pull_request(
        &self,
        repo: &RepoName,
        pull: &NewPullRequest,
    ) -> Result<CreatedPullRequest, HostError>;

    /// Comment on an issue or pull request.
    fn comment(&self, repo: &RepoName, number: u64, body: &str) -> Result<Comment, HostError>;
}
