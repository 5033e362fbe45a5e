//! Mapping Resolver: does an incoming pull request touch a tracked path?

use docsync_core::{Mapping, MappingTable, PullRequestRef};
use docsync_host::RemoteHost;

use crate::error::{lookup, PropagateError, Stage};

/// Holds the static mapping table and matches pull requests against it.
#[derive(Debug, Clone)]
pub struct MappingResolver {
    table: MappingTable,
}

impl MappingResolver {
    pub fn new(table: MappingTable) -> Self {
        Self { table }
    }

    /// Fetch the files changed by `pr` and return the mapping they touch.
    ///
    /// `Ok(None)` when no tracked path is part of the change. An anonymous
    /// host is enough.
    pub fn resolve<H: RemoteHost + ?Sized>(
        &self,
        host: &H,
        pr: &PullRequestRef,
    ) -> Result<Option<Mapping>, PropagateError> {
        let files = host
            .pull_request_files(&pr.repository, pr.number)
            .map_err(lookup(Stage::Resolve))?;
        let found = self.match_changed_files(&files).cloned();
        match &found {
            Some(m) => tracing::info!(
                pr = %pr,
                path = %m.tracked_path,
                mission = %m.mission_id,
                "documentation update detected"
            ),
            None => tracing::info!(pr = %pr, files = files.len(), "no tracked path touched"),
        }
        Ok(found)
    }

    /// First mapping, in table order, whose path exactly equals a changed path.
    pub fn match_changed_files(&self, files: &[String]) -> Option<&Mapping> {
        self.table
            .iter()
            .find(|m| files.iter().any(|f| *f == m.tracked_path))
    }
}
