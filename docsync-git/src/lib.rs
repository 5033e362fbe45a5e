//! # docsync-git
//!
//! Disposable local checkouts driven through the `git` binary.
//!
//! A [`WorkingCopy`] is cloned into its own temporary directory, mutated by
//! branch/commit/push operations, and deleted when dropped. Extra remotes are
//! only ever added through [`TransientRemote`] so they disappear with the
//! operation that needed them.

mod command;
pub mod error;
pub mod remote;
pub mod working_copy;

pub use command::GitContext;
pub use error::GitError;
pub use remote::TransientRemote;
pub use working_copy::{PullMode, WorkingCopy};

/// Name of a repository from its clone URL: the last path segment with any
/// trailing `.git` removed.
///
/// Works for `https://host/o/r.git`, `git@host:o/r.git` and local paths.
pub fn repository_name_from_url(url: &str) -> Option<&str> {
    let trimmed = url.trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://github.com/acme/booster-rest-http.git", Some("booster-rest-http"))]
    #[case("https://github.com/acme/booster-rest-http", Some("booster-rest-http"))]
    #[case("git@github.com:acme/rest.http.git", Some("rest.http"))]
    #[case("/tmp/forks/booster/", Some("booster"))]
    #[case("git@github.com:booster.git", Some("booster"))]
    #[case("", None)]
    fn name_from_url(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(repository_name_from_url(url), expected);
    }
}
