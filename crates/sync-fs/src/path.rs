//! Root-relative paths shared by the source and replica trees

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// A path relative to a tree root.
///
/// Only plain name components are allowed: absolute paths, drive prefixes
/// and `..` are rejected at construction, `.` components are dropped. A
/// `RelPath` therefore always resolves to a location at or below whatever
/// root it is joined onto. The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath {
    inner: PathBuf,
}

impl RelPath {
    /// The root of a tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a `RelPath`, rejecting anything that could escape a root.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut inner = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Normal(name) => inner.push(name),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(Error::InvalidRelPath {
                        path: path.to_path_buf(),
                        reason: "parent directory components are not allowed",
                    });
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::InvalidRelPath {
                        path: path.to_path_buf(),
                        reason: "path must be relative",
                    });
                }
            }
        }

        Ok(Self { inner })
    }

    /// Derive the relative path of `path` beneath `root`.
    pub fn from_prefixed(root: &Path, path: &Path) -> Result<Self> {
        let stripped = path
            .strip_prefix(root)
            .map_err(|_| Error::InvalidRelPath {
                path: path.to_path_buf(),
                reason: "path is not under the walk root",
            })?;
        Self::new(stripped)
    }

    /// Whether this path denotes the root itself.
    pub fn is_root(&self) -> bool {
        self.inner.as_os_str().is_empty()
    }

    /// Append a single name component.
    pub fn join(&self, name: impl AsRef<OsStr>) -> Result<Self> {
        let name = name.as_ref();
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self {
                inner: self.inner.join(name),
            }),
            _ => Err(Error::InvalidRelPath {
                path: self.inner.join(name),
                reason: "expected a single name component",
            }),
        }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            inner: self.inner.parent().map(Path::to_path_buf).unwrap_or_default(),
        })
    }

    pub fn file_name(&self) -> Option<&OsStr> {
        self.inner.file_name()
    }

    /// Number of name components; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.inner.components().count()
    }

    /// True if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &RelPath) -> bool {
        self != other && other.inner.starts_with(&self.inner)
    }

    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    /// Resolve against a tree root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.is_root() {
            root.to_path_buf()
        } else {
            root.join(&self.inner)
        }
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        let mut first = true;
        for component in self.inner.components() {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{}", component.as_os_str().to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for RelPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

impl TryFrom<&str> for RelPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Canonicalize a path that may not exist yet.
///
/// The nearest existing ancestor is canonicalized and the missing tail is
/// appended verbatim, so two paths can be compared for containment before
/// either has been created.
pub fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(path, e))?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        match dunce::canonicalize(existing) {
            Ok(canonical) => {
                let mut resolved = canonical;
                for name in tail.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Err(Error::io(path, e)),
            },
        }
    }
}
