//! Applying planned actions to the replica

use std::path::PathBuf;

use serde::Serialize;
use sync_fs::{RelPath, io};

use super::action::SyncAction;
use crate::events::{EventSink, SyncEvent};
use crate::{Error, Result, SyncTarget};

/// Result of executing one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The mutation was performed
    Applied,
    /// Dry run: the mutation would have been performed
    Planned,
    /// The mutation failed; the replica entry is unchanged or partially
    /// converged and will be retried next pass
    Failed { error: String },
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Applies [`SyncAction`]s to the replica tree.
pub struct SyncExecutor<'a> {
    target: &'a SyncTarget,
    dry_run: bool,
}

impl<'a> SyncExecutor<'a> {
    pub fn new(target: &'a SyncTarget) -> Self {
        Self {
            target,
            dry_run: false,
        }
    }

    /// Report actions as planned instead of applying them.
    #[must_use]
    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// Filesystem failures are returned as [`Error::Fs`]; a deletion that
    /// would resolve outside the replica tree is refused with
    /// [`Error::UnsafeTarget`].
    pub fn apply(&self, action: &SyncAction) -> Result<()> {
        match action {
            SyncAction::MkDir(rel) => io::create_dir_all(&self.target.replica_path(rel))?,
            SyncAction::CopyFile(rel) | SyncAction::UpdateFile(rel) => {
                io::copy_atomic(&self.target.source_path(rel), &self.target.replica_path(rel))?;
            }
            SyncAction::DeleteFile(rel) => io::remove_file(&self.deletion_target(rel)?)?,
            SyncAction::DeleteDir(rel) => io::remove_dir_all(&self.deletion_target(rel)?)?,
        }
        Ok(())
    }

    /// Resolve a deletion strictly inside the replica root.
    fn deletion_target(&self, rel: &RelPath) -> Result<PathBuf> {
        let replica_root = self.target.replica_root();
        if rel.is_root() {
            return Err(Error::UnsafeTarget {
                path: replica_root.to_path_buf(),
                reason: "the replica root itself is never deleted",
            });
        }

        let path = self.target.replica_path(rel);
        if !path.starts_with(replica_root) || path.starts_with(self.target.source_root()) {
            return Err(Error::UnsafeTarget {
                path,
                reason: "deletions must stay inside the replica",
            });
        }
        Ok(path)
    }

    /// Apply one action and report the outcome to `sink`.
    ///
    /// Never fails: errors are reported as [`Outcome::Failed`] so the caller
    /// can move on to the next action.
    pub fn execute(&self, action: &SyncAction, sink: &dyn EventSink) -> Outcome {
        let kind = action.kind();
        let destination = self.target.replica_path(action.path());
        let source = kind
            .reads_source()
            .then(|| self.target.source_path(action.path()));

        if self.dry_run {
            sink.emit(&SyncEvent::planned(kind, source, destination));
            return Outcome::Planned;
        }

        match self.apply(action) {
            Ok(()) => {
                sink.emit(&SyncEvent::applied(kind, source, destination));
                Outcome::Applied
            }
            Err(e) => {
                let error = e.to_string();
                sink.emit(&SyncEvent::failed(kind, destination, error.clone()));
                Outcome::Failed { error }
            }
        }
    }
}
