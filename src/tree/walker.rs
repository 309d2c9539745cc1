//! Filesystem walker for traversing directory structures

use crate::error::TreeError;
use crate::tree::filter::PathFilter;
use crate::tree::hasher;
use crate::tree::item::{Fingerprint, ItemKind, TreeItem};
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// How file fingerprints are computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMode {
    /// Modification time and size only
    #[default]
    Metadata,
    /// Modification time, size and a BLAKE3 hash of the bytes
    Content,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Maximum depth below the root to traverse (None = unlimited)
    pub max_depth: Option<usize>,
    /// Fingerprint computation for files
    pub fingerprint: FingerprintMode,
}

/// An entry produced by a walk, with its root-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub kind: ItemKind,
    pub fingerprint: Fingerprint,
}

impl WalkEntry {
    pub fn file(path: impl Into<PathBuf>, fingerprint: Fingerprint) -> Self {
        Self {
            path: path.into(),
            kind: ItemKind::File,
            fingerprint,
        }
    }

    pub fn folder(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ItemKind::Folder,
            fingerprint: Fingerprint::FOLDER,
        }
    }
}

impl From<WalkEntry> for TreeItem {
    fn from(entry: WalkEntry) -> Self {
        match entry.kind {
            ItemKind::File => TreeItem::file(entry.path, entry.fingerprint),
            ItemKind::Folder => TreeItem::folder(entry.path),
        }
    }
}

/// Source of directory entries for snapshot construction.
///
/// `walk` yields every accepted descendant of `root` in an order that is
/// stable for a given disk state. Entries that cannot be read are left out;
/// they never fail the walk.
///
/// A folder that can be stat'ed but not listed is still yielded as an item;
/// only its contents are missing.
pub trait EntrySource {
    /// Validate the root and return the form stored in the snapshot
    fn resolve_root(&self, root: &Path) -> Result<PathBuf, TreeError> {
        path::canonicalize_root(root)
    }

    fn walk<F>(&self, root: &Path, filter: &F) -> Vec<WalkEntry>
    where
        F: PathFilter + ?Sized;
}

/// Disk walker backed by `walkdir`
#[derive(Debug, Clone, Default)]
pub struct DiskWalker {
    config: WalkerConfig,
}

impl DiskWalker {
    /// Create a walker with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a walker with custom configuration
    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    fn accepts<F>(root: &Path, entry: &DirEntry, filter: &F) -> bool
    where
        F: PathFilter + ?Sized,
    {
        if entry.depth() == 0 {
            return true;
        }
        match entry.path().strip_prefix(root) {
            Ok(relative) => filter.accepts(relative, entry.file_type().is_dir()),
            Err(_) => false,
        }
    }

    /// Turn a directory entry into a walk entry; `None` skips it.
    fn record(&self, root: &Path, entry: &DirEntry) -> Option<WalkEntry> {
        let relative = entry.path().strip_prefix(root).ok()?.to_path_buf();
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            trace!(path = %relative.display(), "Skipping symlink");
            return None;
        }
        if file_type.is_dir() {
            return Some(WalkEntry::folder(relative));
        }
        if !file_type.is_file() {
            trace!(path = %relative.display(), "Skipping special file");
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!(path = %relative.display(), error = %e, "Skipping entry without metadata");
                return None;
            }
        };
        let mut fingerprint = Fingerprint::from_metadata(metadata.modified().ok(), metadata.len());

        if self.config.fingerprint == FingerprintMode::Content {
            match hasher::hash_file(entry.path()) {
                Ok(hash) => fingerprint = fingerprint.with_content(hash),
                Err(e) => {
                    debug!(path = %relative.display(), error = %e, "Skipping unreadable file");
                    return None;
                }
            }
        }

        Some(WalkEntry::file(relative, fingerprint))
    }
}

impl EntrySource for DiskWalker {
    fn walk<F>(&self, root: &Path, filter: &F) -> Vec<WalkEntry>
    where
        F: PathFilter + ?Sized,
    {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| Self::accepts(root, entry, filter));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    skipped += 1;
                    debug!(
                        path = ?e.path(),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                    continue;
                }
            };

            match self.record(root, &entry) {
                Some(walk_entry) => entries.push(walk_entry),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(
                root = %root.display(),
                skipped,
                "Some entries were left out of the snapshot"
            );
        }

        entries
    }
}
