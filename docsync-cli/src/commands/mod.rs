//! Subcommands, plus the settings/client plumbing they share.

pub mod boosters;
pub mod checkout;
pub mod propagate;
pub mod resolve;
pub mod run;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use docsync_core::{MappingTable, Settings, Token};
use docsync_git::GitContext;
use docsync_host::GitHubClient;

/// `--config <file>` when given, `~/.docsync/config.yaml` otherwise.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Settings::load().context("failed to load ~/.docsync/config.yaml"),
    }
}

pub fn load_mapping(settings: &Settings) -> Result<MappingTable> {
    MappingTable::load(&settings.mapping_file).context("failed to load the mapping table")
}

/// Client for read-only commands: authenticated when a token is available
/// (for the higher rate limit), anonymous otherwise.
pub fn read_client(settings: &Settings) -> (GitHubClient, Option<Token>) {
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    match settings.token() {
        Ok(token) => (
            GitHubClient::authenticated(&settings.api_url, timeout, token.clone()),
            Some(token),
        ),
        Err(_) => (GitHubClient::anonymous(&settings.api_url, timeout), None),
    }
}

/// Client for commands that fork, push or comment.
pub fn write_client(settings: &Settings) -> Result<(GitHubClient, Token)> {
    let token = settings
        .token()
        .context("this command writes to the remote host")?;
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let client = GitHubClient::authenticated(&settings.api_url, timeout, token.clone());
    Ok((client, token))
}

pub fn git_context(settings: &Settings, token: Option<Token>) -> GitContext {
    GitContext::new(settings.identity.clone(), token)
}
