//! Path canonicalization and normalization utilities

use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

use crate::error::TreeError;

/// Canonicalize a snapshot root and check that it is a directory.
///
/// Two snapshots of the same directory always carry the same root, whatever
/// spelling (relative, `..`, symlinked) the caller used.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, TreeError> {
    let canonical = dunce::canonicalize(root)
        .map_err(|e| TreeError::invalid_root(root, format!("cannot resolve path: {}", e)))?;

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| TreeError::invalid_root(root, format!("cannot stat path: {}", e)))?;
    if !metadata.is_dir() {
        return Err(TreeError::invalid_root(root, "not a directory"));
    }

    Ok(canonical)
}

/// Normalize a basename to NFC so composed and decomposed spellings of the
/// same name index together.
pub fn normalize_name(name: &str) -> String {
    name.nfc().collect()
}

/// Strip root, prefix and `.` components so a user-supplied suffix can be
/// compared component-wise against root-relative paths.
pub fn relative_components(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
        .collect()
}

/// Resolve a subtree given either root-relative or absolute under `root`.
pub fn resolve_subtree(root: &Path, subtree: &Path) -> PathBuf {
    if subtree.is_absolute() {
        if let Ok(stripped) = subtree.strip_prefix(root) {
            return stripped.to_path_buf();
        }
        if let Ok(canonical) = dunce::canonicalize(subtree) {
            if let Ok(stripped) = canonical.strip_prefix(root) {
                return stripped.to_path_buf();
            }
        }
        // Outside the snapshot: no preference
        return PathBuf::new();
    }
    relative_components(subtree)
}

/// Number of leading components two paths share
pub fn shared_prefix_len(a: &Path, b: &Path) -> usize {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .count()
}
