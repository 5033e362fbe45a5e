//! Shared checkout procedure: clone, then bring a fork level with its parent.

use docsync_git::{GitContext, PullMode, TransientRemote, WorkingCopy};
use docsync_host::{RemoteHost, Repository};

use crate::error::{git, lookup, missing, PropagateError, Stage};

/// Name of the transient remote pointing at a fork's parent.
pub const UPSTREAM_REMOTE: &str = "upstream";

/// Clone `repo` into a fresh temporary directory.
///
/// When `repo` is a fork, the parent's default branch is fast-forward-pulled
/// into the checked-out branch so the change lands on current content.
pub fn checkout_repository<H: RemoteHost + ?Sized>(
    host: &H,
    repo: &Repository,
    git_ctx: &GitContext,
) -> Result<WorkingCopy, PropagateError> {
    let copy = WorkingCopy::clone_from(&repo.clone_url, git_ctx.clone())
        .map_err(git(Stage::Checkout))?;

    if repo.fork {
        let parent = match &repo.parent {
            Some(parent) => (**parent).clone(),
            None => fetch_parent(host, repo)?,
        };
        update_fork(&copy, &parent)?;
    }
    Ok(copy)
}

fn fetch_parent<H: RemoteHost + ?Sized>(
    host: &H,
    repo: &Repository,
) -> Result<Repository, PropagateError> {
    let full = host
        .repository(&repo.full_name)
        .map_err(lookup(Stage::UpdateFork))?;
    full.parent
        .map(|p| *p)
        .ok_or_else(|| missing(Stage::UpdateFork, format!("parent of fork {}", repo.full_name)))
}

fn update_fork(copy: &WorkingCopy, parent: &Repository) -> Result<(), PropagateError> {
    tracing::info!(
        parent = %parent.full_name,
        branch = %parent.default_branch,
        "updating fork from upstream"
    );
    let upstream = TransientRemote::add(copy, UPSTREAM_REMOTE, &parent.clone_url)
        .map_err(git(Stage::UpdateFork))?;
    copy.pull(upstream.name(), &parent.default_branch, PullMode::FastForwardOnly)
        .map_err(git(Stage::UpdateFork))?;
    Ok(())
}
