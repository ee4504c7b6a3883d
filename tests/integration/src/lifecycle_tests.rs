//! Multi-pass lifecycle tests
//!
//! A source tree is edited between passes the way a user would edit it, and
//! after every pass the replica must match the source exactly.

use std::fs;

use pretty_assertions::assert_eq;
use sync_core::{ActionKind, MemorySink, PassOptions, SyncEvent, SyncTarget, run_pass};
use sync_fs::{EntryKind, Fingerprint, TreeWalker};
use sync_test_utils::TestTree;

fn pass(target: &SyncTarget) -> Vec<ActionKind> {
    let report = run_pass(target, &PassOptions::default(), &MemorySink::new()).unwrap();
    assert!(!report.has_failures(), "pass failed: {:?}", report.records);
    report.actions().map(|a| a.kind()).collect()
}

#[test]
fn test_project_lifecycle() {
    let tree = TestTree::without_replica();
    tree.write_source("README.md", "# Project");
    tree.write_source("src/main.rs", "fn main() {}");
    tree.write_source("src/lib/mod.rs", "pub mod util;");
    tree.write_source("assets/logo.bin", [0u8, 159, 146, 150, 255]);
    let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();
    target.preflight().unwrap();

    // Initial mirror
    pass(&target);
    tree.assert_mirrored();

    // Edit one file, add another
    tree.write_source("src/main.rs", "fn main() { println!(\"hi\"); }");
    tree.write_source("src/lib/util.rs", "pub fn util() {}");
    assert_eq!(pass(&target), vec![ActionKind::CopyFile, ActionKind::UpdateFile]);
    tree.assert_mirrored();

    // Rename a directory: one creation tree, one deletion
    fs::rename(tree.source().join("assets"), tree.source().join("static")).unwrap();
    assert_eq!(
        pass(&target),
        vec![ActionKind::MkDir, ActionKind::CopyFile, ActionKind::DeleteDir]
    );
    tree.assert_mirrored();

    // Replace a file with a directory of the same name
    fs::remove_file(tree.source().join("README.md")).unwrap();
    tree.write_source("README.md/index.md", "# Project");
    assert_eq!(
        pass(&target),
        vec![ActionKind::DeleteFile, ActionKind::MkDir, ActionKind::CopyFile]
    );
    tree.assert_mirrored();

    // Empty the source completely
    for entry in fs::read_dir(tree.source()).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            fs::remove_dir_all(path).unwrap();
        } else {
            fs::remove_file(path).unwrap();
        }
    }
    pass(&target);
    tree.assert_mirrored();
    assert!(tree.replica().is_dir(), "the replica root itself must survive");

    assert!(pass(&target).is_empty());
}

#[test]
fn test_replica_edits_are_reverted() {
    let tree = TestTree::new();
    tree.write_source("config.toml", "answer = 42");
    tree.write_source("data/a.txt", "a");
    let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();
    pass(&target);

    tree.write_replica("config.toml", "answer = 0");
    tree.write_replica("data/intruder.txt", "not in source");
    fs::remove_file(tree.replica().join("data/a.txt")).unwrap();

    assert_eq!(
        pass(&target),
        vec![
            ActionKind::UpdateFile,
            ActionKind::CopyFile,
            ActionKind::DeleteFile
        ]
    );
    tree.assert_mirrored();
}

#[test]
fn test_copied_files_have_source_fingerprints() {
    let tree = TestTree::new();
    tree.write_source("a.txt", "alpha");
    tree.write_source("nested/b.bin", vec![7u8; 200_000]);
    tree.write_source("nested/deeper/c.txt", "");
    let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();

    pass(&target);

    for entry in TreeWalker::new(tree.source()).walk() {
        let entry = entry.unwrap();
        if entry.kind == EntryKind::File {
            let source = Fingerprint::of_file(&entry.rel_path.resolve(&tree.source())).unwrap();
            let replica = Fingerprint::of_file(&entry.rel_path.resolve(&tree.replica())).unwrap();
            assert_eq!(source, replica, "{} differs", entry.rel_path);
        }
    }
}

#[test]
fn test_events_describe_each_operation() {
    let tree = TestTree::new();
    tree.write_source("new.txt", "new");
    tree.write_replica("gone.txt", "old");
    let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();
    let sink = MemorySink::new();

    run_pass(&target, &PassOptions::default(), &sink).unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    match &events[0] {
        SyncEvent::Applied {
            kind: ActionKind::CopyFile,
            source: Some(source),
            destination,
            ..
        } => {
            assert!(source.ends_with("source/new.txt"));
            assert!(destination.ends_with("replica/new.txt"));
        }
        other => panic!("unexpected first event: {other:?}"),
    }
    match &events[1] {
        SyncEvent::Applied {
            kind: ActionKind::DeleteFile,
            source: None,
            destination,
            ..
        } => assert!(destination.ends_with("replica/gone.txt")),
        other => panic!("unexpected second event: {other:?}"),
    }
}
