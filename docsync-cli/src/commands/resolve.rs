//! `docsync resolve`: does a pull request touch a tracked path?

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsync_core::{PullRequestRef, RepoName};
use docsync_propagate::MappingResolver;

use super::{load_mapping, load_settings, read_client};

/// Arguments for `docsync resolve`.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Repository of the pull request (`owner/name`).
    pub repository: RepoName,

    /// Pull request number.
    pub number: u64,

    /// Emit machine-readable JSON (`null` when nothing matches).
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = load_settings(config)?;
        let resolver = MappingResolver::new(load_mapping(&settings)?);
        let (client, _) = read_client(&settings);
        let pr = PullRequestRef::new(self.repository, self.number);

        let found = resolver
            .resolve(&client, &pr)
            .with_context(|| format!("failed to resolve {pr}"))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&found)?);
            return Ok(());
        }
        match found {
            Some(mapping) => println!(
                "{} {pr} updates {} (mission {})",
                "✓".green(),
                mapping.tracked_path.bold(),
                mapping.mission_id.to_string().cyan()
            ),
            None => println!("{} {pr} does not touch any tracked path", "·".dimmed()),
        }
        Ok(())
    }
}
