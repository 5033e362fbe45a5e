//! Scoped git remotes.

use crate::error::GitError;
use crate::working_copy::WorkingCopy;

/// A remote that exists only while this guard is alive.
///
/// Added on construction, removed on drop. Used for the `upstream` and `pr`
/// remotes, which only matter for one fetch.
#[derive(Debug)]
pub struct TransientRemote<'a> {
    copy: &'a WorkingCopy,
    name: String,
}

impl<'a> TransientRemote<'a> {
    /// Add remote `name` at `url` to `copy`.
    pub fn add(copy: &'a WorkingCopy, name: &str, url: &str) -> Result<Self, GitError> {
        copy.git(&["remote", "add", name, url])?;
        Ok(Self {
            copy,
            name: name.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TransientRemote<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.copy.git(&["remote", "remove", &self.name]) {
            tracing::warn!(remote = %self.name, error = %err, "failed to remove transient remote");
        }
    }
}
