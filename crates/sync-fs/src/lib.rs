//! Filesystem primitives for syncfolders
//!
//! Provides root-relative paths, content fingerprints, tree walking and the
//! copy/delete operations the synchronization pass is built from.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use path::RelPath;
pub use walk::{EntryKind, FileEntry, TreeWalker, Walk};
