//! Integration tests for snapshot differences on disk

use super::test_utils::{sample_project, set_mtime, write_file};
use fstree::tree::{AcceptAll, DiskWalker, FingerprintMode, FsTree, WalkerConfig};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn snapshot(root: &std::path::Path) -> FsTree {
    FsTree::build(root, &AcceptAll).unwrap()
}

#[test]
fn test_rewalk_of_unchanged_directory_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let first = snapshot(temp_dir.path());
    let second = snapshot(temp_dir.path());

    assert!(second.difference_from(&first).is_empty());
    assert!(first.difference_from(&first).is_empty());
}

#[test]
fn test_add_remove_modify_each_reported_once() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "keep.txt", "same");
    write_file(root, "gone.txt", "bye");
    write_file(root, "edit.txt", "v1");
    set_mtime(root, "keep.txt", 1_000);
    set_mtime(root, "edit.txt", 1_000);

    let before = snapshot(root);

    fs::remove_file(root.join("gone.txt")).unwrap();
    write_file(root, "new/fresh.txt", "hello");
    write_file(root, "edit.txt", "version two");
    set_mtime(root, "edit.txt", 2_000);

    let after = snapshot(root);
    let diff = after.changes_from(&before);

    assert_eq!(diff.added, vec![PathBuf::from("new"), PathBuf::from("new/fresh.txt")]);
    assert_eq!(diff.removed, vec![PathBuf::from("gone.txt")]);
    assert_eq!(diff.modified, vec![PathBuf::from("edit.txt")]);

    let expected: HashSet<PathBuf> = ["new", "new/fresh.txt", "gone.txt", "edit.txt"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(after.difference_from(&before), expected);
}

#[test]
fn test_touch_is_reported_as_modified() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "a.txt", "x");
    set_mtime(root, "a.txt", 1_000);

    let before = snapshot(root);
    set_mtime(root, "a.txt", 5_000);
    let after = snapshot(root);

    assert_eq!(
        after.difference_from(&before),
        HashSet::from([PathBuf::from("a.txt")])
    );
}

#[test]
fn test_same_size_same_mtime_rewrite_is_not_reported() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "a.txt", "aaaa");
    set_mtime(root, "a.txt", 1_000);

    let before = snapshot(root);
    write_file(root, "a.txt", "bbbb");
    set_mtime(root, "a.txt", 1_000);
    let after = snapshot(root);

    assert!(after.difference_from(&before).is_empty());
}

#[test]
fn test_content_mode_sees_same_size_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "a.txt", "aaaa");
    set_mtime(root, "a.txt", 1_000);
    let walker = DiskWalker::with_config(WalkerConfig {
        fingerprint: FingerprintMode::Content,
        ..WalkerConfig::default()
    });

    let before = FsTree::build_with(root, &AcceptAll, &walker).unwrap();
    write_file(root, "a.txt", "bbbb");
    set_mtime(root, "a.txt", 1_000);
    let after = FsTree::build_with(root, &AcceptAll, &walker).unwrap();

    assert_eq!(after.changes_from(&before).modified, vec![PathBuf::from("a.txt")]);
}

#[test]
fn test_file_replaced_by_folder() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "thing", "file");

    let before = snapshot(root);
    fs::remove_file(root.join("thing")).unwrap();
    write_file(root, "thing/inner.txt", "x");
    let after = snapshot(root);

    let diff = after.changes_from(&before);
    assert_eq!(diff.modified, vec![PathBuf::from("thing")]);
    assert_eq!(diff.added, vec![PathBuf::from("thing/inner.txt")]);
    assert!(diff.removed.is_empty());
}

#[test]
fn test_rename_is_remove_plus_add() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "old.txt", "x");

    let before = snapshot(root);
    fs::rename(root.join("old.txt"), root.join("new.txt")).unwrap();
    let after = snapshot(root);

    let diff = after.changes_from(&before);
    assert_eq!(diff.added, vec![PathBuf::from("new.txt")]);
    assert_eq!(diff.removed, vec![PathBuf::from("old.txt")]);
    assert!(diff.modified.is_empty());
}

#[test]
fn test_difference_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    sample_project(root);
    let before = snapshot(root);
    write_file(root, "src/extra.c", "x");
    let after = snapshot(root);

    assert_eq!(after.difference_from(&before), after.difference_from(&before));
    assert_eq!(after.changes_from(&before), after.changes_from(&before));
}
