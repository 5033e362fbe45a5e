//! Process configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.docsync/
//!   config.yaml     (optional: every field has a default)
//!   mapping.yml     (tracked path → mission id)
//!   boosters.yaml   (booster catalog)
//! ```
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::types::Token;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_BRANCH: &str = "documentation-update";
pub const DEFAULT_BASE_BRANCH: &str = "master";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the fork/propagate loop does when one booster fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing booster and return its error.
    #[default]
    Abort,
    /// Record the failure and carry on with the remaining boosters.
    Continue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Abort => write!(f, "abort"),
            FailurePolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Author/committer used for automated commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for CommitIdentity {
    fn default() -> Self {
        Self {
            name: "docsync".to_owned(),
            email: "docsync@users.noreply.github.com".to_owned(),
        }
    }
}

/// Tera templates for the text docsync writes to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub commit: String,
    pub title: String,
    pub body: String,
    pub comment: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            commit: "automatically updated".to_owned(),
            title: "Doc update".to_owned(),
            body: "*automatic created PR* triggered by documentation update".to_owned(),
            comment: "automatic PR created to update the booster {{ pull_request_url }}"
                .to_owned(),
        }
    }
}

/// Contents of `~/.docsync/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub token_env: String,
    pub request_timeout_secs: u64,
    /// Branch the propagated change is committed on.
    pub branch: String,
    /// Integration branch the propagated PR targets.
    pub base_branch: String,
    pub failure_policy: FailurePolicy,
    /// Relative paths resolve against `~/.docsync/`.
    pub mapping_file: PathBuf,
    /// Relative paths resolve against `~/.docsync/`.
    pub catalog_file: PathBuf,
    pub identity: CommitIdentity,
    pub messages: MessageTemplates,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token_env: DEFAULT_TOKEN_ENV.to_owned(),
            request_timeout_secs: 30,
            branch: DEFAULT_BRANCH.to_owned(),
            base_branch: DEFAULT_BASE_BRANCH.to_owned(),
            failure_policy: FailurePolicy::Abort,
            mapping_file: PathBuf::from("mapping.yml"),
            catalog_file: PathBuf::from("boosters.yaml"),
            identity: CommitIdentity::default(),
            messages: MessageTemplates::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.docsync/`
pub fn config_dir_at(home: &Path) -> PathBuf {
    home.join(".docsync")
}

/// `<home>/.docsync/config.yaml`
pub fn config_path_at(home: &Path) -> PathBuf {
    config_dir_at(home).join("config.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

impl Settings {
    /// Load `<home>/.docsync/config.yaml`, or defaults if it does not exist.
    ///
    /// Relative `mapping_file` / `catalog_file` are resolved against
    /// `<home>/.docsync/`.
    pub fn load_at(home: &Path) -> Result<Self, CoreError> {
        let path = config_path_at(home);
        let mut settings = if path.exists() {
            Self::load_file(&path)?
        } else {
            Self::default()
        };
        settings.resolve_paths(&config_dir_at(home));
        Ok(settings)
    }

    /// `load_at` convenience wrapper.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_at(&home()?)
    }

    /// Load an explicit config file. Relative data-file paths resolve against
    /// the file's directory.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let mut settings = Self::load_file(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        settings.resolve_paths(base);
        Ok(settings)
    }

    fn load_file(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn resolve_paths(&mut self, base: &Path) {
        if self.mapping_file.is_relative() {
            self.mapping_file = base.join(&self.mapping_file);
        }
        if self.catalog_file.is_relative() {
            self.catalog_file = base.join(&self.catalog_file);
        }
    }

    /// Read the write token from the configured environment variable.
    pub fn token(&self) -> Result<Token, CoreError> {
        Token::from_env(&self.token_env)
    }
}

fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
