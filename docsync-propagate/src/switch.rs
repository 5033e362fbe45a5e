//! Checkout of an existing pull request's head.
//!
//! A head ref living in the base repository is already reachable through
//! `origin`. A head ref living in a fork has to be fetched from the fork's
//! URL, through a transient `pr` remote.

use docsync_core::PullRequestRef;
use docsync_git::{GitContext, PullMode, TransientRemote, WorkingCopy};
use docsync_host::RemoteHost;

use crate::checkout::checkout_repository;
use crate::error::{git, lookup, missing, PropagateError, Stage};

/// Name of the transient remote pointing at a fork-origin PR head.
pub const PR_REMOTE: &str = "pr";

/// How the head ref was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadCheckout {
    /// Head ref lives in the base repository; checked out from `origin`.
    SameRepository { branch: String },
    /// Head ref lives in a fork; pulled through the transient `pr` remote.
    Fork { branch: String, remote_url: String },
}

impl HeadCheckout {
    pub fn branch(&self) -> &str {
        match self {
            HeadCheckout::SameRepository { branch } | HeadCheckout::Fork { branch, .. } => branch,
        }
    }
}

/// Switch `copy` (a checkout of the PR's base repository) to the head of `pr`.
pub fn switch_to_pull_request_head<H: RemoteHost + ?Sized>(
    host: &H,
    copy: &mut WorkingCopy,
    pr: &PullRequestRef,
) -> Result<HeadCheckout, PropagateError> {
    let pull = host
        .pull_request(&pr.repository, pr.number)
        .map_err(lookup(Stage::SwitchHead))?;
    let head_repo = pull
        .head
        .repo
        .ok_or_else(|| missing(Stage::SwitchHead, format!("head repository of {pr}")))?;
    let base_repo = pull
        .base
        .repo
        .ok_or_else(|| missing(Stage::SwitchHead, format!("base repository of {pr}")))?;
    let branch = pull.head.ref_name;

    if head_repo.clone_url != base_repo.clone_url {
        tracing::info!(pr = %pr, branch = %branch, head = %head_repo.full_name, "pull request from fork");
        copy.switch_new_branch(&branch)
            .map_err(git(Stage::SwitchHead))?;
        let remote = TransientRemote::add(copy, PR_REMOTE, &head_repo.clone_url)
            .map_err(git(Stage::SwitchHead))?;
        copy.pull(remote.name(), &branch, PullMode::Merge)
            .map_err(git(Stage::SwitchHead))?;
        Ok(HeadCheckout::Fork {
            branch,
            remote_url: head_repo.clone_url,
        })
    } else {
        tracing::info!(pr = %pr, branch = %branch, "pull request from same repository");
        copy.switch_to_origin_branch(&branch)
            .map_err(git(Stage::SwitchHead))?;
        Ok(HeadCheckout::SameRepository { branch })
    }
}

/// Clone the base repository of `pr` and switch to its head.
pub fn checkout_pull_request<H: RemoteHost + ?Sized>(
    host: &H,
    git_ctx: &GitContext,
    pr: &PullRequestRef,
) -> Result<(WorkingCopy, HeadCheckout), PropagateError> {
    let repo = host
        .repository(&pr.repository)
        .map_err(lookup(Stage::Checkout))?;
    let mut copy = checkout_repository(host, &repo, git_ctx)?;
    let head = switch_to_pull_request_head(host, &mut copy, pr)?;
    Ok((copy, head))
}
