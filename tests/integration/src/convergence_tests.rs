//! Property tests: any pair of trees converges in one pass
//!
//! Random source and replica trees are built from a small alphabet so that
//! paths collide often, including file/directory clashes at the same name.

use std::fs;
use std::path::Path;

use proptest::prelude::*;
use sync_core::{MemorySink, PassOptions, SyncAction, SyncTarget, run_pass};
use sync_test_utils::{TestTree, snapshot};

/// A file to create: `/`-separated path and content.
type Entry = (String, Vec<u8>);

fn entry() -> impl Strategy<Value = Entry> {
    (
        prop::collection::vec("[abc]", 1..4).prop_map(|parts| parts.join("/")),
        prop::sample::select(vec![b"".to_vec(), b"x".to_vec(), b"y".to_vec(), b"xyz".to_vec()]),
    )
}

/// Write `entries` under `root`, skipping any that clash with an earlier one.
fn build(root: &Path, entries: &[Entry]) {
    for (rel, content) in entries {
        let path = root.join(rel);
        let blocked = path
            .ancestors()
            .skip(1)
            .take_while(|a| *a != root)
            .any(|a| a.is_file());
        if blocked || path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_pass_converges_and_second_is_empty(
        source in prop::collection::vec(entry(), 0..12),
        replica in prop::collection::vec(entry(), 0..12),
    ) {
        let tree = TestTree::new();
        build(&tree.source(), &source);
        build(&tree.replica(), &replica);
        let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();
        let source_before = snapshot(&tree.source());

        let first = run_pass(&target, &PassOptions::default(), &MemorySink::new()).unwrap();
        prop_assert!(!first.has_failures());
        prop_assert_eq!(snapshot(&tree.replica()), snapshot(&tree.source()));
        prop_assert_eq!(snapshot(&tree.source()), source_before);

        let second = run_pass(&target, &PassOptions::default(), &MemorySink::new()).unwrap();
        prop_assert!(second.records.is_empty());
    }

    #[test]
    fn deletions_are_never_nested(
        source in prop::collection::vec(entry(), 0..12),
        replica in prop::collection::vec(entry(), 0..12),
    ) {
        let tree = TestTree::new();
        build(&tree.source(), &source);
        build(&tree.replica(), &replica);
        let target = SyncTarget::new(tree.source(), tree.replica()).unwrap();
        let options = PassOptions { dry_run: true, ..PassOptions::default() };

        let report = run_pass(&target, &options, &MemorySink::new()).unwrap();

        let deleted_dirs: Vec<_> = report
            .actions()
            .filter_map(|a| match a {
                SyncAction::DeleteDir(p) => Some(p.clone()),
                _ => None,
            })
            .collect();
        for action in report.actions().filter(|a| a.kind().is_deletion()) {
            for dir in &deleted_dirs {
                prop_assert!(!dir.is_ancestor_of(action.path()));
            }
        }
    }
}
