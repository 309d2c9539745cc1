//! Difference computation between two snapshots of the same root

use crate::tree::snapshot::FsTree;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Changes between a previous snapshot and the current one.
///
/// Paths are root-relative and each list is sorted. A path whose kind
/// changed (file replaced by a folder or the reverse) counts as modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeDiff {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Every changed path, regardless of how it changed
    pub fn paths(&self) -> HashSet<PathBuf> {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.modified)
            .cloned()
            .collect()
    }
}

impl FsTree {
    /// Classify every path that differs between `previous` and `self`.
    ///
    /// Both snapshots are expected to share a root. Comparing snapshots of
    /// different roots is not meaningful; it is logged and the relative paths
    /// are compared anyway.
    pub fn changes_from(&self, previous: &FsTree) -> TreeDiff {
        if self.root_path() != previous.root_path() {
            warn!(
                current = %self.root_path().display(),
                previous = %previous.root_path().display(),
                "Diffing snapshots with different roots"
            );
        }

        let mut diff = TreeDiff::default();

        for item in &self.items {
            match previous.item(item.path()) {
                None => diff.added.push(item.path().to_path_buf()),
                Some(old) if !old.same_state(item) => {
                    diff.modified.push(item.path().to_path_buf())
                }
                Some(_) => {}
            }
        }

        // Only presence matters on this side; state was compared above.
        for item in &previous.items {
            if !self.by_path.contains_key(item.path()) {
                diff.removed.push(item.path().to_path_buf());
            }
        }

        diff.added.sort();
        diff.removed.sort();
        diff.modified.sort();

        debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            modified = diff.modified.len(),
            "Computed snapshot difference"
        );

        diff
    }

    /// Set of paths whose presence, kind or fingerprint differs from
    /// `previous`.
    pub fn difference_from(&self, previous: &FsTree) -> HashSet<PathBuf> {
        self.changes_from(previous).paths()
    }
}
