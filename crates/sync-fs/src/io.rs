//! Atomic copy and delete primitives

use std::fs::{self, File};
use std::path::Path;

use filetime::FileTime;

use crate::{Error, Result};

/// Prefix of the temporary files `copy_atomic` creates beside its target
pub const TEMP_PREFIX: &str = ".syncfolders-";

/// Create a directory and any missing parents.
///
/// Succeeds without doing anything if the directory already exists.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Copy `source` over `dest` without ever exposing a partial file.
///
/// The bytes are streamed into a temporary file in the destination
/// directory, which receives the source's permissions and modification time,
/// is flushed to disk and then renamed over `dest`. If anything fails the
/// temporary file is removed and `dest` is left as it was.
///
/// Returns the number of bytes copied.
pub fn copy_atomic(source: &Path, dest: &Path) -> Result<u64> {
    let parent = dest.parent().ok_or_else(|| {
        Error::io(
            dest,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "destination has no parent"),
        )
    })?;
    create_dir_all(parent)?;

    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;
    let metadata = reader.metadata().map_err(|e| Error::io(source, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;

    let copied = std::io::copy(&mut reader, temp.as_file_mut()).map_err(|e| Error::io(source, e))?;

    let file = temp.as_file();
    file.sync_all().map_err(|e| Error::io(temp.path(), e))?;
    filetime::set_file_handle_times(
        file,
        None,
        Some(FileTime::from_last_modification_time(&metadata)),
    )
    .map_err(|e| Error::io(temp.path(), e))?;
    file.set_permissions(metadata.permissions())
        .map_err(|e| Error::io(temp.path(), e))?;

    temp.persist(dest).map_err(|e| Error::io(dest, e.error))?;

    tracing::trace!(source = %source.display(), dest = %dest.display(), bytes = copied, "copied");
    Ok(copied)
}

/// Remove a single file, symlink or other non-directory entry.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Remove a directory and everything beneath it.
///
/// Symlinks inside the directory are removed, never followed.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}
