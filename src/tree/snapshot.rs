//! Snapshot construction

use crate::error::TreeError;
use crate::tree::filter::PathFilter;
use crate::tree::item::TreeItem;
use crate::tree::path;
use crate::tree::walker::{DiskWalker, EntrySource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Immutable snapshot of a directory subtree.
///
/// Items are stored in walk order with root-relative paths. The path and
/// basename indexes are derived from `items` once, at construction, and are
/// never updated afterwards: a new disk state means a new `FsTree`.
#[derive(Debug, Clone)]
pub struct FsTree {
    pub(crate) root_path: PathBuf,
    pub(crate) build_time: Duration,
    pub(crate) items: Vec<TreeItem>,
    /// Root-relative path to index into `items`
    pub(crate) by_path: HashMap<PathBuf, usize>,
    /// Exact basename to file indices, sorted by path
    pub(crate) by_name: HashMap<String, Vec<usize>>,
    /// NFC-normalized basename to file indices, sorted by path
    pub(crate) by_normalized_name: HashMap<String, Vec<usize>>,
    pub(crate) folders: Vec<usize>,
    pub(crate) files: Vec<usize>,
}

impl FsTree {
    /// Snapshot `root` from disk with the default walker configuration.
    pub fn build<F>(root: impl AsRef<Path>, filter: &F) -> Result<Self, TreeError>
    where
        F: PathFilter + ?Sized,
    {
        Self::build_with(root, filter, &DiskWalker::new())
    }

    /// Snapshot `root` using an explicit entry source.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn build_with<F, S>(root: impl AsRef<Path>, filter: &F, source: &S) -> Result<Self, TreeError>
    where
        F: PathFilter + ?Sized,
        S: EntrySource,
    {
        let start = Instant::now();
        let root_path = source.resolve_root(root.as_ref())?;

        let entries = source.walk(&root_path, filter);
        let mut items: Vec<TreeItem> = Vec::with_capacity(entries.len());
        let mut by_path = HashMap::with_capacity(entries.len());

        for entry in entries {
            if by_path.contains_key(&entry.path) {
                warn!(path = %entry.path.display(), "Duplicate entry from walk ignored");
                continue;
            }
            by_path.insert(entry.path.clone(), items.len());
            items.push(entry.into());
        }

        let mut tree = Self {
            root_path,
            build_time: Duration::ZERO,
            items,
            by_path,
            by_name: HashMap::new(),
            by_normalized_name: HashMap::new(),
            folders: Vec::new(),
            files: Vec::new(),
        };
        tree.index();
        tree.build_time = start.elapsed();

        info!(
            item_count = tree.items.len(),
            file_count = tree.files.len(),
            folder_count = tree.folders.len(),
            duration_ms = tree.build_time.as_millis(),
            "Snapshot build completed"
        );

        Ok(tree)
    }

    /// Derive the kind and basename indexes from `items`.
    fn index(&mut self) {
        for (idx, item) in self.items.iter().enumerate() {
            if item.is_folder() {
                self.folders.push(idx);
                continue;
            }
            self.files.push(idx);
            if let Some(name) = item.file_name() {
                self.by_name.entry(name.to_string()).or_default().push(idx);
                self.by_normalized_name
                    .entry(path::normalize_name(name))
                    .or_default()
                    .push(idx);
            }
        }

        let items = &self.items;
        for indices in self
            .by_name
            .values_mut()
            .chain(self.by_normalized_name.values_mut())
        {
            indices.sort_by(|a, b| items[*a].path().cmp(items[*b].path()));
        }
    }

    /// Canonical root directory of the snapshot
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Wall-clock time spent walking and indexing
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// All items in walk order
    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item recorded at a root-relative path
    pub fn item(&self, relative: impl AsRef<Path>) -> Option<&TreeItem> {
        self.by_path
            .get(relative.as_ref())
            .map(|idx| &self.items[*idx])
    }

    /// Absolute location of a root-relative path
    pub fn absolute_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root_path.join(relative)
    }

    /// Paths of all folders, in walk order
    pub fn folder_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.folders.iter().map(|idx| self.items[*idx].path())
    }

    /// Paths of all files, in walk order
    pub fn file_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.iter().map(|idx| self.items[*idx].path())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }
}
