//! Domain types shared by every docsync crate.
//!
//! Identifiers are newtypes; the only validated one is [`RepoName`], which
//! must always be `owner/name`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a mission (the reference project a booster derives from).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MissionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MissionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository on the remote host, in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    /// Parse an `owner/name` identifier.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidRepository(s.to_owned());
        let (owner, name) = s.split_once('/').ok_or_else(invalid)?;
        let valid_part = |p: &str| {
            !p.is_empty() && !p.contains('/') && !p.chars().any(char::is_whitespace)
        };
        if !valid_part(owner) || !valid_part(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Build from already-separated parts.
    pub fn new(owner: &str, name: &str) -> Result<Self, CoreError> {
        Self::parse(&format!("{owner}/{name}"))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RepoName {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RepoName> for String {
    fn from(r: RepoName) -> Self {
        r.full_name()
    }
}

/// A token credential for the remote host.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Read the token from the environment variable `var`.
    ///
    /// Unset and empty are both reported as [`CoreError::MissingToken`].
    pub fn from_env(var: &str) -> Result<Self, CoreError> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(Self(v.trim().to_owned())),
            _ => Err(CoreError::MissingToken(var.to_owned())),
        }
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A tracked documentation path and the mission it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub tracked_path: String,
    pub mission_id: MissionId,
}

impl Mapping {
    pub fn new(tracked_path: impl Into<String>, mission_id: impl Into<MissionId>) -> Self {
        Self {
            tracked_path: tracked_path.into(),
            mission_id: mission_id.into(),
        }
    }
}

/// A booster entry from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booster {
    #[serde(rename = "mission")]
    pub mission_id: MissionId,
    pub repository: RepoName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Names a pull request on the remote host.
///
/// Only the coordinates are kept; PR metadata is always re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub repository: RepoName,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(repository: RepoName, number: u64) -> Self {
        Self { repository, number }
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.number)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
