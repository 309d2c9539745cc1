//! Integration tests for name and suffix lookups on disk

use super::test_utils::{sample_project, write_file};
use fstree::tree::{AcceptAll, FsTree};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_prefers_file_inside_subtree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "a/X.txt", "a");
    write_file(root, "b/X.txt", "b");

    let tree = FsTree::build(root, &AcceptAll).unwrap();

    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("X.txt", "b"),
        Some(Path::new("b/X.txt"))
    );
    let absolute_b = tree.root_path().join("b");
    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("X.txt", &absolute_b),
        Some(Path::new("b/X.txt"))
    );
    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("X.txt", "a"),
        Some(Path::new("a/X.txt"))
    );
}

#[test]
fn test_suffix_respects_component_boundaries() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("Sources/Foo.h", ""),
        Some(Path::new("lib/Sources/Foo.h"))
    );
    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("MySources/Foo.h", ""),
        Some(Path::new("lib/MySources/Foo.h"))
    );
    assert_eq!(
        tree.path_of_best_file_matching_path_suffix("ources/Foo.h", ""),
        None
    );
}

#[test]
fn test_paths_of_files_named_are_exact() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    let paths = tree.paths_of_files_named("Foo.h");
    assert_eq!(
        paths,
        vec![Path::new("lib/MySources/Foo.h"), Path::new("lib/Sources/Foo.h")]
    );
    for path in &paths {
        assert_eq!(path.file_name().unwrap(), "Foo.h");
        assert!(tree.item(path).unwrap().is_file());
    }
    let all_files = tree.file_paths().filter(|p| p.file_name().unwrap() == "Foo.h").count();
    assert_eq!(all_files, paths.len());
}

#[test]
fn test_single_name_lookup_agrees_with_list() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    for name in ["Foo.h", "main.c", "Makefile", "missing.c"] {
        let single = tree.path_of_file_named(name);
        let all = tree.paths_of_files_named(name);
        assert_eq!(single.is_some(), tree.contains_file_named(name));
        if let Some(single) = single {
            assert!(all.contains(&single));
        }
    }
    assert!(!tree.contains_file_named("src"));
}

#[test]
fn test_lookups_after_absolute_path_conversion() {
    let temp_dir = TempDir::new().unwrap();
    sample_project(temp_dir.path());

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    let relative = tree.path_of_file_named("util.h").unwrap();
    let absolute = tree.absolute_path(relative);
    assert!(absolute.is_file());
    assert!(absolute.starts_with(tree.root_path()));
}

#[test]
fn test_name_lookup_returns_exact_basenames() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "docs/cafe\u{301}.txt", "decomposed");

    let tree = FsTree::build(temp_dir.path(), &AcceptAll).unwrap();

    let composed = "caf\u{e9}.txt";
    let by_name = tree.paths_of_files_named(composed);
    for path in &by_name {
        assert_eq!(path.file_name().unwrap(), composed);
    }
    assert_eq!(by_name, tree.paths_of_files_matching(|name| name == composed));
    assert_eq!(tree.paths_of_files_named_normalized(composed).len(), 1);
}
