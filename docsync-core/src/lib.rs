//! docsync core library: domain types, configuration, mapping table, catalog.
//!
//! - [`types`]: newtypes and domain structs
//! - [`error`]: [`CoreError`]
//! - [`settings`]: `~/.docsync/config.yaml`
//! - [`mapping`]: the tracked-path → mission table
//! - [`catalog`]: the booster catalog

pub mod catalog;
pub mod error;
pub mod mapping;
pub mod settings;
pub mod types;

pub use error::CoreError;
pub use mapping::MappingTable;
pub use settings::{CommitIdentity, FailurePolicy, MessageTemplates, Settings};
pub use types::{Booster, Mapping, MissionId, PullRequestRef, RepoName, Token};
