//! Local checkouts of remote repositories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::command::GitContext;
use crate::error::{io_err, GitError};

const TEMP_PREFIX: &str = "docsync-checkout-";

/// How `pull` may integrate the fetched ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    /// Refuse anything but a fast-forward.
    FastForwardOnly,
    /// Merge when the histories diverged.
    Merge,
}

enum Location {
    /// Owned temporary directory, deleted on drop.
    Temporary(TempDir),
    /// Caller-owned directory, left in place.
    Existing(PathBuf),
}

/// A local, exclusively-owned checkout of one repository.
///
/// Bound to the repository behind `origin` for its whole lifetime. A copy
/// created by [`WorkingCopy::clone_from`] lives in a fresh temporary
/// directory that is removed when the value is dropped.
pub struct WorkingCopy {
    location: Location,
    origin_url: String,
    base_branch: String,
    ctx: GitContext,
}

impl WorkingCopy {
    /// Clone `url` into a fresh temporary directory.
    pub fn clone_from(url: &str, ctx: GitContext) -> Result<Self, GitError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir()
            .map_err(|e| io_err(std::env::temp_dir(), e))?;
        ctx.run(dir.path(), &["clone", "--quiet", url, "."])?;
        tracing::info!(path = %dir.path().display(), "cloned {}", ctx.redact(url));
        Self::bind(Location::Temporary(dir), ctx)
    }

    /// Open an existing checkout. The directory is not removed on drop.
    pub fn open(path: &Path, ctx: GitContext) -> Result<Self, GitError> {
        if !path.is_dir() {
            return Err(io_err(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }
        Self::bind(Location::Existing(path.to_path_buf()), ctx)
    }

    fn bind(location: Location, ctx: GitContext) -> Result<Self, GitError> {
        let mut copy = Self {
            location,
            origin_url: String::new(),
            base_branch: String::new(),
            ctx,
        };
        copy.origin_url = copy
            .git(&["remote", "get-url", "origin"])
            .map_err(|_| GitError::MissingOrigin {
                path: copy.path().to_path_buf(),
            })?;
        copy.base_branch = copy.default_branch()?;
        Ok(copy)
    }

    /// Branch `origin/HEAD` points at, or the current branch when the
    /// checkout never recorded one.
    fn default_branch(&self) -> Result<String, GitError> {
        match self.git(&["symbolic-ref", "--quiet", "--short", "refs/remotes/origin/HEAD"]) {
            Ok(head) => Ok(head.strip_prefix("origin/").unwrap_or(&head).to_owned()),
            Err(GitError::Command { .. }) => self.current_branch(),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn git(&self, args: &[&str]) -> Result<String, GitError> {
        self.ctx.run(self.path(), args)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        match &self.location {
            Location::Temporary(dir) => dir.path(),
            Location::Existing(path) => path,
        }
    }

    /// URL of `origin`: the repository this copy belongs to.
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    /// The branch new work branches are cut from: the remote's default
    /// branch, or the branch checked out at open time when that is unknown.
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    pub fn current_branch(&self) -> Result<String, GitError> {
        self.git(&["symbolic-ref", "--quiet", "--short", "HEAD"])
            .map_err(|_| GitError::NotOnBranch {
                path: self.path().to_path_buf(),
            })
    }

    pub fn branch_exists(&self, name: &str) -> Result<bool, GitError> {
        let refname = format!("refs/heads/{name}");
        match self.git(&["show-ref", "--verify", "--quiet", &refname]) {
            Ok(_) => Ok(true),
            Err(GitError::Command { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Full sha of `rev`.
    pub fn rev_parse(&self, rev: &str) -> Result<String, GitError> {
        self.git(&["rev-parse", "--verify", rev])
    }

    /// Names of the configured remotes.
    pub fn remotes(&self) -> Result<Vec<String>, GitError> {
        Ok(self
            .git(&["remote"])?
            .lines()
            .map(str::to_owned)
            .collect())
    }

    // -----------------------------------------------------------------------
    // Branches
    // -----------------------------------------------------------------------

    /// Force-delete `name` if present, recreate it at the base branch and
    /// switch to it. Working-tree edits are carried over untouched.
    pub fn recreate_branch(&self, name: &str) -> Result<(), GitError> {
        if name == self.base_branch {
            return Err(GitError::WorkBranchIsBase {
                branch: name.to_owned(),
                path: self.path().to_path_buf(),
            });
        }
        let base = if self.branch_exists(&self.base_branch)? {
            self.base_branch.clone()
        } else {
            format!("origin/{}", self.base_branch)
        };
        // Detach first: git refuses to delete the checked-out branch.
        self.git(&["checkout", "--quiet", "--detach"])?;
        self.git(&["reset", "--quiet", "--soft", &base])?;
        if self.branch_exists(name)? {
            self.git(&["branch", "--quiet", "-D", name])?;
        }
        self.git(&["checkout", "--quiet", "-b", name])?;
        Ok(())
    }

    /// Create (or reset) `name` at HEAD and switch to it.
    pub fn switch_new_branch(&mut self, name: &str) -> Result<(), GitError> {
        self.git(&["checkout", "--quiet", "-B", name])?;
        self.base_branch = name.to_owned();
        Ok(())
    }

    /// Create (or reset) `name` at `origin/<name>` and switch to it.
    pub fn switch_to_origin_branch(&mut self, name: &str) -> Result<(), GitError> {
        let start = format!("origin/{name}");
        self.git(&["checkout", "--quiet", "-B", name, &start])?;
        self.base_branch = name.to_owned();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commit / sync
    // -----------------------------------------------------------------------

    /// Stage every change and commit. Returns the new commit sha.
    pub fn commit_all(&self, message: &str) -> Result<String, GitError> {
        self.git(&["add", "--all"])?;
        if self.git(&["status", "--porcelain"])?.is_empty() {
            return Err(GitError::NothingToCommit {
                path: self.path().to_path_buf(),
            });
        }
        self.git(&["commit", "--quiet", "-m", message])?;
        self.rev_parse("HEAD")
    }

    /// Force-push `branch` to the branch of the same name on `origin`.
    pub fn push(&self, branch: &str) -> Result<(), GitError> {
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        self.git(&["push", "--quiet", "--force", "origin", &refspec])?;
        Ok(())
    }

    /// Pull `branch` from `remote` into the current branch.
    pub fn pull(&self, remote: &str, branch: &str, mode: PullMode) -> Result<(), GitError> {
        let strategy = match mode {
            PullMode::FastForwardOnly => "--ff-only",
            PullMode::Merge => "--no-rebase",
        };
        self.git(&["pull", "--quiet", "--no-edit", strategy, remote, branch])?;
        Ok(())
    }

    /// Keep the checkout on disk after the value is dropped and return its path.
    pub fn keep(self) -> PathBuf {
        match self.location {
            Location::Temporary(dir) => dir.into_path(),
            Location::Existing(path) => path,
        }
    }
}

impl std::fmt::Debug for WorkingCopy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingCopy")
            .field("path", &self.path())
            .field("origin_url", &self.ctx.redact(&self.origin_url))
            .field("base_branch", &self.base_branch)
            .finish()
    }
}
