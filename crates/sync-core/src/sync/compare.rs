//! Tree comparison
//!
//! Two independent walks per pass. The forward walk over the source plans
//! creations and updates; the reverse walk over the replica plans deletions.

use sync_fs::path::canonicalize_lenient;
use sync_fs::{EntryKind, Fingerprint, RelPath, TreeWalker};
use tracing::debug;

use super::action::{Plan, ScanIssue, SyncAction};
use crate::{SymlinkPolicy, SyncTarget};

/// Plans the actions that make a replica identical to its source.
///
/// The comparator only reads. It never touches the replica, and a failure
/// on one entry becomes a [`ScanIssue`] rather than aborting the comparison.
pub struct TreeComparator<'a> {
    target: &'a SyncTarget,
    symlinks: SymlinkPolicy,
}

impl<'a> TreeComparator<'a> {
    pub fn new(target: &'a SyncTarget, symlinks: SymlinkPolicy) -> Self {
        Self { target, symlinks }
    }

    /// Compare both trees.
    ///
    /// The resulting actions are ordered: creations parent-before-child,
    /// every deletion-then-creation pair adjacent, and reverse-walk
    /// deletions last. No deletion is planned beneath a directory that is
    /// itself being deleted.
    pub fn compare(&self) -> Plan {
        let mut plan = Plan::default();
        self.forward(&mut plan);
        self.reverse(&mut plan);
        plan
    }

    fn replica_root_kind(&self) -> sync_fs::Result<Option<EntryKind>> {
        EntryKind::inspect(self.target.replica_root(), true)
    }

    /// Source -> replica: directories to create, files to copy or update.
    fn forward(&self, plan: &mut Plan) {
        match self.replica_root_kind() {
            Ok(Some(EntryKind::Directory)) => {}
            Ok(_) => plan.push(SyncAction::MkDir(RelPath::root())),
            Err(e) => plan.issue(ScanIssue::from_error(self.target.replica_root(), &e)),
        }

        let mut walk = TreeWalker::new(self.target.source_root())
            .follow_links(self.symlinks.follows())
            .walk();
        while let Some(item) = walk.next() {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    plan.issue(ScanIssue::from_error(self.target.source_root(), &e));
                    continue;
                }
            };

            match entry.kind {
                EntryKind::Directory if self.symlinks.follows() => {
                    if self.guard_followed_dir(&entry.rel_path, plan) {
                        self.visit_source_dir(entry.rel_path, plan);
                    } else {
                        walk.skip_current_dir();
                    }
                }
                EntryKind::Directory => self.visit_source_dir(entry.rel_path, plan),
                EntryKind::File => self.visit_source_file(entry.rel_path, plan),
                EntryKind::Symlink => debug!(path = %entry.rel_path, "skipping symlink"),
                EntryKind::Other => debug!(path = %entry.rel_path, "skipping special file"),
            }
        }
    }

    /// Whether a source directory reached with symlinks followed may be
    /// mirrored. Directories that resolve into the replica are skipped.
    fn guard_followed_dir(&self, rel: &RelPath, plan: &mut Plan) -> bool {
        let source = self.target.source_path(rel);
        match canonicalize_lenient(&source) {
            Ok(resolved) if resolved.starts_with(self.target.replica_root()) => {
                plan.issue(ScanIssue::new(
                    source,
                    format!("resolves into the replica at {}", resolved.display()),
                ));
                false
            }
            Ok(_) => true,
            Err(e) => {
                plan.issue(ScanIssue::from_error(&source, &e));
                false
            }
        }
    }

    fn visit_source_dir(&self, rel: RelPath, plan: &mut Plan) {
        let replica = self.target.replica_path(&rel);
        match EntryKind::inspect(&replica, false) {
            Ok(Some(EntryKind::Directory)) => {}
            Ok(None) => plan.push(SyncAction::MkDir(rel)),
            Ok(Some(kind)) => {
                debug!(path = %rel, replica_kind = ?kind, "directory in source, not in replica");
                plan.push(SyncAction::DeleteFile(rel.clone()));
                plan.push(SyncAction::MkDir(rel));
            }
            Err(e) => plan.issue(ScanIssue::from_error(&replica, &e)),
        }
    }

    fn visit_source_file(&self, rel: RelPath, plan: &mut Plan) {
        let replica = self.target.replica_path(&rel);
        let replica_kind = match EntryKind::inspect(&replica, false) {
            Ok(kind) => kind,
            Err(e) => {
                plan.issue(ScanIssue::from_error(&replica, &e));
                return;
            }
        };
        match replica_kind {
            None => plan.push(SyncAction::CopyFile(rel)),
            Some(EntryKind::File) => {
                let source = self.target.source_path(&rel);
                let source_fp = match Fingerprint::of_file(&source) {
                    Ok(fp) => fp,
                    Err(e) => {
                        plan.issue(ScanIssue::from_error(&source, &e));
                        return;
                    }
                };
                match Fingerprint::of_file(&replica) {
                    Ok(replica_fp) if replica_fp == source_fp => {
                        debug!(path = %rel, fingerprint = %source_fp, "unchanged");
                    }
                    Ok(replica_fp) => {
                        debug!(path = %rel, source = %source_fp, replica = %replica_fp, "content differs");
                        plan.push(SyncAction::UpdateFile(rel));
                    }
                    Err(e) => {
                        // An unreadable replica file is replaced wholesale.
                        debug!(path = %rel, error = %e, "replica file unreadable");
                        plan.push(SyncAction::UpdateFile(rel));
                    }
                }
            }
            Some(EntryKind::Directory) => {
                debug!(path = %rel, "file in source, directory in replica");
                plan.push(SyncAction::DeleteDir(rel.clone()));
                plan.push(SyncAction::CopyFile(rel));
            }
            Some(kind) => {
                debug!(path = %rel, replica_kind = ?kind, "file in source, not a regular file in replica");
                plan.push(SyncAction::DeleteFile(rel.clone()));
                plan.push(SyncAction::CopyFile(rel));
            }
        }
    }

    /// What the source holds at `rel`, as seen through the symlink policy.
    ///
    /// Entries the forward walk ignores (skipped symlinks, special files)
    /// report `None`, so their replica counterparts are removed. An entry
    /// that cannot be inspected is an error, never `None`.
    fn source_kind(&self, rel: &RelPath) -> sync_fs::Result<Option<EntryKind>> {
        let path = self.target.source_path(rel);
        Ok(match EntryKind::inspect(&path, self.symlinks.follows())? {
            Some(EntryKind::Symlink | EntryKind::Other) | None => None,
            kind => kind,
        })
    }

    /// Replica -> source: entries with no counterpart are deleted.
    fn reverse(&self, plan: &mut Plan) {
        if !matches!(self.replica_root_kind(), Ok(Some(EntryKind::Directory))) {
            return;
        }

        let mut walk = TreeWalker::new(self.target.replica_root()).walk();
        while let Some(item) = walk.next() {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    plan.issue(ScanIssue::from_error(self.target.replica_root(), &e));
                    continue;
                }
            };

            let source_kind = match self.source_kind(&entry.rel_path) {
                Ok(kind) => kind,
                Err(e) => {
                    // Unknown source state: keep the replica entry and its contents.
                    if entry.kind == EntryKind::Directory {
                        walk.skip_current_dir();
                    }
                    plan.issue(ScanIssue::from_error(self.target.source_root(), &e));
                    continue;
                }
            };

            match (entry.kind, source_kind) {
                (EntryKind::Directory, None) => {
                    // One recursive deletion covers every descendant.
                    walk.skip_current_dir();
                    plan.push(SyncAction::DeleteDir(entry.rel_path));
                }
                (_, None) => plan.push(SyncAction::DeleteFile(entry.rel_path)),
                (EntryKind::Directory, Some(EntryKind::Directory)) => {}
                (EntryKind::Directory, Some(_)) => {
                    // Replaced by the forward walk.
                    walk.skip_current_dir();
                }
                (_, Some(_)) => {}
            }
        }
    }
}
