use std::fs;
use std::time::{Duration, UNIX_EPOCH};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use filetime::FileTime;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use sync_fs::{Fingerprint, io};

#[test]
fn test_copy_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("source.txt");
    source.write_str("hello world").unwrap();
    let dest = temp.child("dest.txt");

    let copied = io::copy_atomic(source.path(), dest.path()).unwrap();

    assert_eq!(copied, 11);
    dest.assert("hello world");
}

#[test]
fn test_copy_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("source.txt");
    source.write_str("updated").unwrap();
    let dest = temp.child("dest.txt");
    dest.write_str("original").unwrap();

    io::copy_atomic(source.path(), dest.path()).unwrap();

    dest.assert("updated");
}

#[test]
fn test_copy_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("source.txt");
    source.write_str("deep").unwrap();
    let dest = temp.child("a/b/dest.txt");

    io::copy_atomic(source.path(), dest.path()).unwrap();

    dest.assert("deep");
    temp.child("a/b").assert(predicate::path::is_dir());
}

#[test]
fn test_copy_atomic_missing_source_leaves_dest_alone() {
    let temp = TempDir::new().unwrap();
    let dest = temp.child("dest.txt");
    dest.write_str("original").unwrap();

    let err = io::copy_atomic(temp.child("absent.txt").path(), dest.path()).unwrap_err();

    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    dest.assert("original");
}

#[test]
fn test_copy_atomic_preserves_modification_time() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("source.txt");
    source.write_str("hello").unwrap();
    let dest = temp.child("dest.txt");

    // Jan 1, 2024
    let expected = UNIX_EPOCH + Duration::from_secs(1_704_067_200);
    filetime::set_file_mtime(source.path(), FileTime::from_system_time(expected)).unwrap();

    io::copy_atomic(source.path(), dest.path()).unwrap();

    let actual = fs::metadata(dest.path()).unwrap().modified().unwrap();
    let diff = if actual > expected {
        actual.duration_since(expected).unwrap()
    } else {
        expected.duration_since(actual).unwrap()
    };
    assert!(
        diff < Duration::from_secs(1),
        "mtime not preserved: expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_copy_round_trip_keeps_fingerprint() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("blob.bin");
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();
    source.write_binary(&data).unwrap();
    let dest = temp.child("copy.bin");

    let before = Fingerprint::of_file(source.path()).unwrap();
    io::copy_atomic(source.path(), dest.path()).unwrap();
    let after = Fingerprint::of_file(dest.path()).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_copy_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("source.txt");
    source.write_str("content").unwrap();
    let out = temp.child("out");
    out.create_dir_all().unwrap();

    io::copy_atomic(source.path(), out.child("target.txt").path()).unwrap();

    let names: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["target.txt".to_string()]);
    let is_temp = predicate::str::starts_with(io::TEMP_PREFIX);
    assert!(names.iter().all(|n| !is_temp.eval(n.as_str())));
}

#[test]
fn test_create_dir_all_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let dir = temp.child("x/y");

    io::create_dir_all(dir.path()).unwrap();
    io::create_dir_all(dir.path()).unwrap();

    dir.assert(predicate::path::is_dir());
}

#[test]
fn test_create_dir_all_over_file_fails() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("taken");
    file.write_str("a file").unwrap();

    let err = io::create_dir_all(file.path()).unwrap_err();

    assert_eq!(err.path(), Some(file.path()));
    file.assert(predicate::path::is_file());
}

#[test]
fn test_remove_dir_all_removes_contents() {
    let temp = TempDir::new().unwrap();
    let dir = temp.child("stale");
    dir.child("one.txt").write_str("1").unwrap();
    dir.child("nested/two.txt").write_str("2").unwrap();

    io::remove_dir_all(dir.path()).unwrap();

    dir.assert(predicate::path::missing());
}

#[test]
fn test_remove_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.child("old.txt");
    file.write_str("old").unwrap();
    let sibling = temp.child("keep.txt");
    sibling.write_str("keep").unwrap();

    io::remove_file(file.path()).unwrap();

    file.assert(predicate::path::missing());
    sibling.assert(predicate::str::contains("keep"));
}
