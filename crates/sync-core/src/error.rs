//! Error types for sync-core

use std::path::PathBuf;

/// Result type for sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source root does not exist
    #[error("Source folder not found: {path}")]
    SourceMissing { path: PathBuf },

    /// The source root exists but is not a directory
    #[error("Source is not a directory: {path}")]
    SourceNotDirectory { path: PathBuf },

    /// The replica root exists but is not a directory
    #[error("Replica is not a directory: {path}")]
    ReplicaNotDirectory { path: PathBuf },

    /// One root contains the other
    #[error("Source {source_root} and replica {replica_root} overlap; neither may contain the other")]
    OverlappingRoots {
        source_root: PathBuf,
        replica_root: PathBuf,
    },

    /// A deletion resolved to a path outside the replica tree
    #[error("Refusing to delete {path}: {reason}")]
    UnsafeTarget { path: PathBuf, reason: &'static str },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from sync-fs
    #[error(transparent)]
    Fs(#[from] sync_fs::Error),
}
