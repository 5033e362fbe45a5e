//! `docsync run`: the whole workflow for one mission pull request.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use docsync_core::{catalog, FailurePolicy, PullRequestRef, RepoName};
use docsync_propagate::pipeline::{self, BoosterReport, RunReport};
use docsync_propagate::MappingResolver;

use super::{git_context, load_mapping, load_settings, write_client};

/// Arguments for `docsync run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Mission repository of the pull request (`owner/name`).
    pub repository: RepoName,

    /// Pull request number.
    pub number: u64,

    /// Keep going when a booster fails; report failures at the end.
    #[arg(long)]
    pub continue_on_error: bool,
}

impl RunArgs {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let mut settings = load_settings(config)?;
        if self.continue_on_error {
            settings.failure_policy = FailurePolicy::Continue;
        }
        let resolver = MappingResolver::new(load_mapping(&settings)?);
        let boosters = catalog::load(&settings.catalog_file)
            .context("failed to load the booster catalog")?;
        let (client, token) = write_client(&settings)?;
        let git = git_context(&settings, Some(token));
        let trigger = PullRequestRef::new(self.repository, self.number);

        let report = pipeline::run(&client, &settings, &git, &resolver, &boosters, &trigger)
            .with_context(|| format!("propagation of {trigger} failed"))?;

        let RunReport::Propagated { mapping, boosters } = report else {
            println!("{} {trigger} does not touch any tracked path", "·".dimmed());
            return Ok(());
        };
        println!(
            "{} {} changed in {trigger} (mission {})",
            "✓".green(),
            mapping.tracked_path.bold(),
            mapping.mission_id.to_string().cyan()
        );
        if boosters.is_empty() {
            println!("  no boosters bound to mission {}", mapping.mission_id);
            return Ok(());
        }

        let failed = print_reports(&boosters);
        if failed > 0 {
            bail!("{failed} of {} booster(s) failed", boosters.len());
        }
        Ok(())
    }
}

fn print_reports(reports: &[BoosterReport]) -> usize {
    let mut failed = 0;
    for report in reports {
        match &report.outcome {
            Ok(done) => println!("  {}  {}  {}", "✎".green(), report.repository, done.pull_request.html_url),
            Err(error) => {
                failed += 1;
                println!("  {}  {}  {}", "✗".red(), report.repository, error);
            }
        }
    }
    failed
}
