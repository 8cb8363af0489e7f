//! File-backed progress persistence.
//!
//! The completed set lives in a single file under the malla root as a JSON
//! array of course ids. Loading never fails: a missing or corrupt file
//! degrades to an empty set. Saving is best-effort: a write failure is logged
//! and the in-memory state is kept.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::catalog::CourseId;
use crate::core::CompletedSet;
use crate::error::Result;
use crate::utils::{ensure_dir, read_optional};

pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted completed set, or an empty set when the file is
    /// missing or unreadable.
    #[must_use]
    pub fn load(&self) -> CompletedSet {
        let raw = match read_optional(&self.path) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(path = %self.path.display(), "no progress file, starting empty");
                return CompletedSet::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read progress, starting empty");
                return CompletedSet::new();
            }
        };

        match serde_json::from_str::<Vec<CourseId>>(&raw) {
            Ok(ids) => CompletedSet::from_ids(ids),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "corrupt progress file, starting empty");
                CompletedSet::new()
            }
        }
    }

    /// Persist the completed set. Failures are logged, never surfaced.
    pub fn save(&self, completed: &CompletedSet) {
        if let Err(err) = self.write(completed) {
            warn!(path = %self.path.display(), %err, "could not persist progress");
        }
    }

    fn write(&self, completed: &CompletedSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let payload = serde_json::to_string(&completed.to_vec())?;
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}
