//! `docsync propagate`: turn an edited checkout into a pull request.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsync_core::{PullRequestRef, RepoName};
use docsync_git::WorkingCopy;
use docsync_propagate::Propagator;

use super::{git_context, load_settings, write_client};

/// Arguments for `docsync propagate`.
#[derive(Args, Debug)]
pub struct PropagateArgs {
    /// Checkout of the fork holding the change (its `origin` is the fork).
    pub path: PathBuf,

    /// Repository of the pull request that triggered the change.
    pub trigger_repository: RepoName,

    /// Number of the triggering pull request.
    pub trigger_number: u64,
}

impl PropagateArgs {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = load_settings(config)?;
        let (client, token) = write_client(&settings)?;
        let copy = WorkingCopy::open(&self.path, git_context(&settings, Some(token)))
            .with_context(|| format!("{} is not a usable checkout", self.path.display()))?;
        let trigger = PullRequestRef::new(self.trigger_repository, self.trigger_number);

        let propagator = Propagator::from_settings(&client, &settings)?;
        let done = propagator
            .propagate(&copy, &trigger)
            .with_context(|| format!("failed to propagate {}", self.path.display()))?;

        println!(
            "{} {} → {} ({})",
            "✓".green(),
            &done.commit[..done.commit.len().min(8)],
            done.target.to_string().bold(),
            done.pull_request.html_url
        );
        Ok(())
    }
}
