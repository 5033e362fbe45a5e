//! The static tracked-path → mission table.
//!
//! Source format is a plain YAML mapping:
//!
//! ```yaml
//! docs/index.html: rest-http
//! docs/crud.adoc: crud
//! ```
//!
//! Entry order is preserved; it is the order the resolver tries them in.

use std::path::Path;

use serde_yaml::Value;

use crate::error::{io_err, CoreError};
use crate::types::{Mapping, MissionId};

/// Immutable, ordered table of tracked paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<Mapping>,
}

impl MappingTable {
    /// Build a table from `(path, mission)` pairs. Later duplicates of a path
    /// are ignored.
    pub fn new<I, P, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, M)>,
        P: Into<String>,
        M: Into<MissionId>,
    {
        let mut table = Self::default();
        for (path, mission) in entries {
            let mapping = Mapping::new(path, mission);
            if table.get(&mapping.tracked_path).is_none() {
                table.entries.push(mapping);
            }
        }
        table
    }

    /// Parse the YAML mapping format.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CoreError> {
        let value: Value = serde_yaml::from_str(contents).map_err(|e| CoreError::Parse {
            path: "<inline>".into(),
            source: e,
        })?;
        Self::from_value(value)
    }

    /// Load the table from a YAML file.
    ///
    /// Returns `CoreError::NotFound` if absent, `CoreError::Parse` (with path)
    /// if malformed YAML.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let value: Value = serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, CoreError> {
        let map = match value {
            Value::Mapping(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(CoreError::Invalid {
                    what: "mapping table",
                    message: format!("expected a mapping of path to mission, got {other:?}"),
                })
            }
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (key, value) in map {
            match (key, value) {
                (Value::String(path), Value::String(mission)) => pairs.push((path, mission)),
                (key, value) => {
                    return Err(CoreError::Invalid {
                        what: "mapping table",
                        message: format!("entry {key:?}: {value:?} is not a string pair"),
                    })
                }
            }
        }
        Ok(Self::new(pairs))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.entries.iter()
    }

    /// Exact-match lookup of a tracked path.
    pub fn get(&self, path: &str) -> Option<&Mapping> {
        self.entries.iter().find(|m| m.tracked_path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
