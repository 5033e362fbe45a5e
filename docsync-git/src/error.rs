//! Error types for docsync-git.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from local git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// git exited non-zero. `stderr` never contains the token.
    #[error("`git {args}` failed ({status}): {stderr}")]
    Command {
        args: String,
        status: String,
        stderr: String,
    },

    /// Filesystem failure around the working copy (temp dir creation, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `commit` was requested with a clean working tree.
    #[error("nothing to commit in {path}")]
    NothingToCommit { path: PathBuf },

    /// The checkout has no `origin` remote, so it has no remote identity.
    #[error("{path} has no origin remote")]
    MissingOrigin { path: PathBuf },

    /// HEAD is detached or unborn where a branch was required.
    #[error("{path} is not on a branch")]
    NotOnBranch { path: PathBuf },

    /// The work branch would be cut from itself.
    #[error("work branch '{branch}' is the base branch of {path}")]
    WorkBranchIsBase { branch: String, path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GitError {
    GitError::Io {
        path: path.into(),
        source,
    }
}
