//! Error types for docsync-propagate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use docsync_core::CoreError;
use docsync_git::GitError;
use docsync_host::HostError;

/// The step of the workflow an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Fork,
    Checkout,
    UpdateFork,
    SwitchHead,
    Apply,
    CreateBranch,
    Commit,
    Push,
    CreatePullRequest,
    LinkBack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Fork => "fork",
            Stage::Checkout => "checkout",
            Stage::UpdateFork => "update-fork",
            Stage::SwitchHead => "switch-head",
            Stage::Apply => "apply",
            Stage::CreateBranch => "create-branch",
            Stage::Commit => "commit",
            Stage::Push => "push",
            Stage::CreatePullRequest => "create-pull-request",
            Stage::LinkBack => "link-back",
        };
        f.write_str(name)
    }
}

/// All errors that can arise from the propagation workflow.
///
/// A documentation mapping that is absent is not an error: the resolver
/// returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum PropagateError {
    /// Read-path host failure.
    #[error("remote lookup failed during {stage}: {source}")]
    RemoteLookup {
        stage: Stage,
        #[source]
        source: HostError,
    },

    /// Fork / PR creation / comment failure.
    #[error("remote write failed during {stage}: {source}")]
    RemoteWrite {
        stage: Stage,
        #[source]
        source: HostError,
    },

    /// Local clone / branch / commit / push / pull failure.
    #[error("git operation failed during {stage}: {source}")]
    Git {
        stage: Stage,
        #[source]
        source: GitError,
    },

    /// The origin URL of a working copy has no repository name in it.
    #[error("cannot derive a repository name from origin URL '{url}'")]
    OriginUrl { url: String },

    /// A tracked path that would escape the working copy.
    #[error("tracked path '{path}' must be relative and stay inside the repository")]
    UnsafePath { path: String },

    /// Copying the tracked file between working copies failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A message template failed to parse or render.
    #[error("message template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PropagateError {
    /// The workflow step that failed, when the error belongs to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PropagateError::RemoteLookup { stage, .. }
            | PropagateError::RemoteWrite { stage, .. }
            | PropagateError::Git { stage, .. } => Some(*stage),
            PropagateError::OriginUrl { .. } => Some(Stage::CreatePullRequest),
            PropagateError::UnsafePath { .. } | PropagateError::Io { .. } => Some(Stage::Apply),
            PropagateError::Template(_) | PropagateError::Core(_) => None,
        }
    }
}

pub(crate) fn lookup(stage: Stage) -> impl FnOnce(HostError) -> PropagateError {
    move |source| PropagateError::RemoteLookup { stage, source }
}

pub(crate) fn write(stage: Stage) -> impl FnOnce(HostError) -> PropagateError {
    move |source| PropagateError::RemoteWrite { stage, source }
}

pub(crate) fn git(stage: Stage) -> impl FnOnce(GitError) -> PropagateError {
    move |source| PropagateError::Git { stage, source }
}

pub(crate) fn missing(stage: Stage, what: String) -> PropagateError {
    PropagateError::RemoteLookup {
        stage,
        source: HostError::Missing { what },
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PropagateError {
    PropagateError::Io {
        path: path.into(),
        source,
    }
}
