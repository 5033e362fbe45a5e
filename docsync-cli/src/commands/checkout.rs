//! `docsync checkout`: check out a pull request's head and keep the directory.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsync_core::{PullRequestRef, RepoName};
use docsync_propagate::{checkout_pull_request, HeadCheckout};

use super::{git_context, load_settings, read_client};

/// Arguments for `docsync checkout`.
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Repository of the pull request (`owner/name`).
    pub repository: RepoName,

    /// Pull request number.
    pub number: u64,
}

impl CheckoutArgs {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = load_settings(config)?;
        let (client, token) = read_client(&settings);
        let git = git_context(&settings, token);
        let pr = PullRequestRef::new(self.repository, self.number);

        let (copy, head) = checkout_pull_request(&client, &git, &pr)
            .with_context(|| format!("failed to check out {pr}"))?;
        let origin = match &head {
            HeadCheckout::SameRepository { .. } => "origin".to_owned(),
            HeadCheckout::Fork { remote_url, .. } => remote_url.clone(),
        };
        let path = copy.keep();

        println!("{} {pr} on branch {} (from {origin})", "✓".green(), head.branch().bold());
        println!("{}", path.display());
        Ok(())
    }
}
