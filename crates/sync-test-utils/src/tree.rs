//! [`TestTree`] builder for source/replica test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

/// What a snapshot records for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
    Symlink(PathBuf),
}

/// Record every entry under `root`, keyed by its `/`-joined relative path.
///
/// Symlinks are recorded, not followed. A missing root yields an empty map.
pub fn snapshot(root: &Path) -> BTreeMap<String, Node> {
    let mut nodes = BTreeMap::new();
    if !root.exists() {
        return nodes;
    }

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.unwrap();
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap()
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let file_type = entry.file_type();
        let node = if file_type.is_symlink() {
            Node::Symlink(fs::read_link(entry.path()).unwrap())
        } else if file_type.is_dir() {
            Node::Dir
        } else {
            Node::File(fs::read(entry.path()).unwrap())
        };
        nodes.insert(rel, node);
    }
    nodes
}

/// A temporary directory holding a `source/` tree and a `replica/` tree.
///
/// # Example
///
/// ```rust,no_run
/// use sync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write_source("file.txt", "Source content");
/// // ... run a pass over tree.source() and tree.replica() ...
/// tree.assert_mirrored();
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create empty `source/` and `replica/` directories.
    pub fn new() -> Self {
        let tree = Self::without_replica();
        fs::create_dir_all(tree.replica()).unwrap();
        tree
    }

    /// Create `source/` only; the replica root does not exist yet.
    pub fn without_replica() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("source")).unwrap();
        Self { temp_dir }
    }

    /// The temporary directory containing both trees.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn replica(&self) -> PathBuf {
        self.root().join("replica")
    }

    /// Write a file under the source root, creating parents.
    pub fn write_source(&self, rel: &str, content: impl AsRef<[u8]>) {
        write_file(&self.source().join(rel), content.as_ref());
    }

    /// Write a file under the replica root, creating parents.
    pub fn write_replica(&self, rel: &str, content: impl AsRef<[u8]>) {
        write_file(&self.replica().join(rel), content.as_ref());
    }

    pub fn mkdir_source(&self, rel: &str) {
        fs::create_dir_all(self.source().join(rel)).unwrap();
    }

    pub fn mkdir_replica(&self, rel: &str) {
        fs::create_dir_all(self.replica().join(rel)).unwrap();
    }

    pub fn read_replica(&self, rel: &str) -> String {
        let path = self.replica().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `rel` exists in the replica.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_replica_exists(&self, rel: &str) {
        let full_path = self.replica().join(rel);
        assert!(
            full_path.symlink_metadata().is_ok(),
            "Expected replica entry to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist in the replica.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_replica_missing(&self, rel: &str) {
        let full_path = self.replica().join(rel);
        assert!(
            full_path.symlink_metadata().is_err(),
            "Expected replica entry NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the replica holds exactly the source's paths, kinds and bytes.
    ///
    /// # Panics
    /// Panics with a diff of the two snapshots if they differ.
    pub fn assert_mirrored(&self) {
        pretty_assertions::assert_eq!(
            snapshot(&self.replica()),
            snapshot(&self.source()),
            "replica does not mirror source"
        );
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
