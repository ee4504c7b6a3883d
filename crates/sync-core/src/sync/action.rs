//! Planned mutations and the plan that holds them

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use sync_fs::RelPath;

/// The kind of a [`SyncAction`], without its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    MkDir,
    CopyFile,
    UpdateFile,
    DeleteFile,
    DeleteDir,
}

impl ActionKind {
    /// Past-tense description used in log lines.
    pub fn verb(self) -> &'static str {
        match self {
            Self::MkDir => "Created directory",
            Self::CopyFile => "Copied file",
            Self::UpdateFile => "Updated file",
            Self::DeleteFile => "Removed file",
            Self::DeleteDir => "Removed directory",
        }
    }

    pub fn is_deletion(self) -> bool {
        matches!(self, Self::DeleteFile | Self::DeleteDir)
    }

    /// Whether the action reads from the source tree.
    pub fn reads_source(self) -> bool {
        matches!(self, Self::CopyFile | Self::UpdateFile)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MkDir => "mkdir",
            Self::CopyFile => "copy",
            Self::UpdateFile => "update",
            Self::DeleteFile => "delete_file",
            Self::DeleteDir => "delete_dir",
        };
        write!(f, "{}", s)
    }
}

/// A single filesystem mutation, not yet applied.
///
/// Paths are relative. Creations and updates name a path that exists in
/// both trees after the action; deletions name a path in the replica only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum SyncAction {
    MkDir(RelPath),
    CopyFile(RelPath),
    UpdateFile(RelPath),
    DeleteFile(RelPath),
    DeleteDir(RelPath),
}

impl SyncAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::MkDir(_) => ActionKind::MkDir,
            Self::CopyFile(_) => ActionKind::CopyFile,
            Self::UpdateFile(_) => ActionKind::UpdateFile,
            Self::DeleteFile(_) => ActionKind::DeleteFile,
            Self::DeleteDir(_) => ActionKind::DeleteDir,
        }
    }

    pub fn path(&self) -> &RelPath {
        match self {
            Self::MkDir(p)
            | Self::CopyFile(p)
            | Self::UpdateFile(p)
            | Self::DeleteFile(p)
            | Self::DeleteDir(p) => p,
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.path())
    }
}

/// A comparison failure for one entry; the entry is left alone this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub error: String,
}

impl ScanIssue {
    pub fn new(path: impl Into<PathBuf>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            error: error.into(),
        }
    }

    pub fn from_error(fallback: &std::path::Path, error: &sync_fs::Error) -> Self {
        Self {
            path: error.path().unwrap_or(fallback).to_path_buf(),
            error: error.to_string(),
        }
    }
}

/// Output of a tree comparison.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Actions in the order they must be applied
    pub actions: Vec<SyncAction>,
    /// Entries that could not be compared
    pub issues: Vec<ScanIssue>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub(crate) fn push(&mut self, action: SyncAction) {
        tracing::debug!(%action, "planned");
        self.actions.push(action);
    }

    pub(crate) fn issue(&mut self, issue: ScanIssue) {
        tracing::warn!(path = %issue.path.display(), error = %issue.error, "could not compare entry");
        self.issues.push(issue);
    }
}
