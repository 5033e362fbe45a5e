//! `docsync boosters`: list the booster catalog.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use docsync_core::{catalog, MissionId};

use super::load_settings;

/// Arguments for `docsync boosters`.
#[derive(Args, Debug)]
pub struct BoostersArgs {
    /// Only list boosters bound to this mission.
    #[arg(long)]
    pub mission: Option<String>,
}

#[derive(Tabled)]
struct BoosterRow {
    #[tabled(rename = "mission")]
    mission: String,
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "name")]
    name: String,
}

impl BoostersArgs {
    pub fn run(self, config: Option<&Path>) -> Result<()> {
        let settings = load_settings(config)?;
        let boosters = catalog::load(&settings.catalog_file)
            .context("failed to load the booster catalog")?;

        let selected = match &self.mission {
            Some(mission) => catalog::for_mission(&boosters, &MissionId::from(mission.as_str())),
            None => boosters.iter().collect(),
        };
        if selected.is_empty() {
            println!("No boosters found.");
            return Ok(());
        }

        let rows = selected.into_iter().map(|b| BoosterRow {
            mission: b.mission_id.to_string(),
            repository: b.repository.to_string(),
            name: b.name.clone().unwrap_or_default(),
        });
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
