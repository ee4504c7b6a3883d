//! Directory tree walking
//!
//! Entries are yielded in a deterministic order (sorted by file name) with
//! every directory before its contents.

use std::fs::{self, FileType};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::{Error, RelPath, Result};

/// What kind of filesystem object sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    /// Sockets, FIFOs and device nodes
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }

    /// Inspect whatever sits at `path`.
    ///
    /// Returns `Ok(None)` only when nothing is there, including when a path
    /// component is not a directory. Any other failure (permission denied,
    /// I/O error, symlink loop) is an error: the caller cannot tell whether
    /// the entry exists. With `follow_links` a symlink reports the kind of
    /// its target, and a dangling link reports `None`.
    pub fn inspect(path: &Path, follow_links: bool) -> Result<Option<Self>> {
        let metadata = if follow_links {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        match metadata {
            Ok(m) => Ok(Some(Self::from_file_type(m.file_type()))),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

/// One entry discovered by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub rel_path: RelPath,
    pub kind: EntryKind,
}

/// Walks a directory tree, yielding entries relative to its root.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    follow_links: bool,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Resolve symlinks and descend into linked directories.
    #[must_use]
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a walk. The root itself is not yielded.
    pub fn walk(&self) -> Walk {
        let inner = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter();
        Walk {
            root: self.root.clone(),
            inner,
        }
    }
}

/// Iterator over the entries of a tree.
///
/// Errors for individual entries are yielded in place; iteration continues
/// past them.
pub struct Walk {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Walk {
    /// Do not descend into the directory that was just yielded.
    pub fn skip_current_dir(&mut self) {
        self.inner.skip_current_dir();
    }
}

impl Iterator for Walk {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e.into())),
        };
        let kind = EntryKind::from_file_type(entry.file_type());
        Some(RelPath::from_prefixed(&self.root, entry.path()).map(|rel_path| FileEntry {
            rel_path,
            kind,
        }))
    }
}
