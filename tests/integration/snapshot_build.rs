//! Integration tests for snapshot construction

use super::test_utils::{sample_project, write_file};
use fstree::ignore::PatternFilter;
use fstree::tree::{AcceptAll, DiskWalker, FingerprintMode, FsTree, ItemKind, WalkerConfig};
use fstree::TreeError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Same disk state produces the same items in the same order
#[test]
fn test_unchanged_directory_same_items() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let first = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();
    let second = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    assert_eq!(first.items(), second.items());
}

#[test]
fn test_records_every_entry() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    let folders: Vec<&Path> = tree.folder_paths().collect();
    assert_eq!(
        folders,
        vec![
            Path::new("empty"),
            Path::new("include"),
            Path::new("lib"),
            Path::new("lib/MySources"),
            Path::new("lib/Sources"),
            Path::new("src"),
        ]
    );
    assert_eq!(tree.file_count(), 6);
    assert_eq!(tree.len(), 12);
}

#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    assert!(tree.is_empty());
    assert!(tree.items().is_empty());
    assert!(!tree.contains_file_named("anything"));
}

#[test]
fn test_deleted_root_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("project");
    write_file(&root, "a.txt", "x");

    let before = FsTree::build(&root, &AcceptAll).unwrap();
    assert_eq!(before.len(), 1);

    fs::remove_dir_all(&root).unwrap();

    let result = FsTree::build(&root, &AcceptAll);
    assert!(matches!(result, Err(TreeError::InvalidRoot { .. })));
}

#[test]
fn test_file_root_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "plain.txt", "x");

    let result = FsTree::build(temp_dir.path().join("plain.txt"), &AcceptAll);
    assert!(matches!(result, Err(TreeError::InvalidRoot { .. })));
}

#[test]
fn test_filter_prunes_subtrees() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());
    write_file(temp_dir.path(), "build/out/main.o", "obj");

    let filter = PatternFilter::new(["build/", "*.h"]).unwrap();
    let tree = FsTree::build(temp_dir.path(), &filter).unwrap();

    assert!(tree.item("build").is_none());
    assert!(tree.item("build/out/main.o").is_none());
    assert!(!tree.contains_file_named("util.h"));
    assert!(tree.contains_file_named("util.c"));
}

#[test]
fn test_closure_filter_sees_relative_paths() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let filter = |path: &Path, is_folder: bool| is_folder || path.starts_with("src");
    let tree = FsTree::build(temp_dir.path(), &filter).unwrap();

    let files: Vec<&Path> = tree.file_paths().collect();
    assert_eq!(files, vec![Path::new("src/main.c"), Path::new("src/util.c")]);
}

#[test]
fn test_items_carry_fingerprints() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "data.bin", "12345");

    let walker = DiskWalker::with_config(WalkerConfig {
        fingerprint: FingerprintMode::Content,
        ..WalkerConfig::default()
    });
    let tree = FsTree::build_with(temp_dir.path(), &AcceptAll, &walker).unwrap();

    let item = tree.item("data.bin").unwrap();
    assert_eq!(item.kind(), ItemKind::File);
    assert_eq!(item.fingerprint().size, 5);
    assert!(item.fingerprint().modified.is_some());
    assert!(item.fingerprint().content.is_some());
}

#[test]
fn test_relative_and_absolute_roots_agree() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "sub/a.txt", "x");
    let dotted: PathBuf = temp_dir.path().join("sub").join("..");

    let plain = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();
    let via_dots = FsTree::build(&dotted, &AcceptAll).unwrap();

    assert_eq!(plain.root_path(), via_dots.root_path());
    assert!(via_dots.difference_from(&plain).is_empty());
}

#[test]
fn test_snapshot_is_shareable_across_threads() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());
    let tree = std::sync::Arc::new(FsTree::build(temp_dir.path(), &AcceptAll).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || tree.paths_of_files_named("Foo.h").len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}

/// A folder whose contents cannot be listed stays in the snapshot itself,
/// but nothing below it is recorded and the build still succeeds.
#[cfg(unix)]
#[test]
fn test_unreadable_folder_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "open/visible.txt", "x");
    write_file(root, "locked/hidden.txt", "y");
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits, so there is nothing to observe.
    let listable = fs::read_dir(&locked).is_ok();
    let result = FsTree::build(root, &AcceptAll);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    if listable {
        return;
    }

    let tree = result.unwrap();
    assert!(tree.item("open/visible.txt").is_some());
    assert!(tree.item("locked").map_or(false, |item| item.is_folder()));
    assert!(tree.item("locked/hidden.txt").is_none());
}
