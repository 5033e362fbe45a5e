//! Error types for docsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading configuration, the mapping table,
/// or the booster catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A YAML document parsed but did not have the expected shape.
    #[error("invalid {what}: {message}")]
    Invalid { what: &'static str, message: String },

    /// A required file did not exist at the expected path.
    #[error("file not found at {path}")]
    NotFound { path: PathBuf },

    /// A repository identifier was not of the form `owner/name`.
    #[error("invalid repository '{0}'; expected owner/name")]
    InvalidRepository(String),

    /// The token environment variable was unset or empty.
    #[error("environment variable {0} is not set; a token is required for write access")]
    MissingToken(String),

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.docsync/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
