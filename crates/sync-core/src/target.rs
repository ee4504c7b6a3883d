//! The source/replica pair a pass operates on

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sync_fs::path::canonicalize_lenient;
use sync_fs::{RelPath, io};

use crate::{Error, Result};

/// A validated pair of tree roots.
///
/// Both roots are stored as absolute, canonical paths. Construction rejects
/// pairs where one root contains the other, since a pass would then copy the
/// replica into itself or delete parts of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    source: PathBuf,
    replica: PathBuf,
}

impl SyncTarget {
    /// Create a target from two paths, which need not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverlappingRoots`] if the roots are equal or nested.
    pub fn new(source: impl AsRef<Path>, replica: impl AsRef<Path>) -> Result<Self> {
        let source = canonicalize_lenient(source.as_ref())?;
        let replica = canonicalize_lenient(replica.as_ref())?;

        if source.starts_with(&replica) || replica.starts_with(&source) {
            return Err(Error::OverlappingRoots {
                source_root: source,
                replica_root: replica,
            });
        }

        Ok(Self { source, replica })
    }

    pub fn source_root(&self) -> &Path {
        &self.source
    }

    pub fn replica_root(&self) -> &Path {
        &self.replica
    }

    /// Absolute location of `rel` in the source tree.
    pub fn source_path(&self, rel: &RelPath) -> PathBuf {
        rel.resolve(&self.source)
    }

    /// Absolute location of `rel` in the replica tree.
    pub fn replica_path(&self, rel: &RelPath) -> PathBuf {
        rel.resolve(&self.replica)
    }

    /// Verify the source root is an existing directory.
    ///
    /// # Errors
    ///
    /// [`Error::SourceMissing`] or [`Error::SourceNotDirectory`]; other I/O
    /// failures are passed through.
    pub fn check_source(&self) -> Result<()> {
        match fs::metadata(&self.source) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(Error::SourceNotDirectory {
                path: self.source.clone(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::SourceMissing {
                path: self.source.clone(),
            }),
            Err(e) => Err(sync_fs::Error::io(&self.source, e).into()),
        }
    }

    /// Startup checks run once before the first pass.
    ///
    /// Fails if the source is not an existing directory or the replica
    /// exists but is not a directory. A missing replica root is created.
    pub fn preflight(&self) -> Result<()> {
        self.check_source()?;

        match fs::metadata(&self.replica) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(Error::ReplicaNotDirectory {
                path: self.replica.clone(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                io::create_dir_all(&self.replica)?;
                tracing::info!(replica = %self.replica.display(), "Created replica folder");
                Ok(())
            }
            Err(e) => Err(sync_fs::Error::io(&self.replica, e).into()),
        }
    }
}
