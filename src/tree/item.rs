//! Snapshot items and their change fingerprints

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::tree::hasher::ContentHash;

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl ItemKind {
    pub fn is_folder(self) -> bool {
        matches!(self, ItemKind::Folder)
    }
}

/// Comparable summary of an entry's state, used to detect change without
/// re-reading file bytes on every comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Last modification time, when the platform reports one
    pub modified: Option<SystemTime>,
    /// Size in bytes
    pub size: u64,
    /// BLAKE3 hash of the file bytes, only in content fingerprint mode
    pub content: Option<ContentHash>,
}

impl Fingerprint {
    /// Folders are identified by presence alone.
    pub const FOLDER: Fingerprint = Fingerprint {
        modified: None,
        size: 0,
        content: None,
    };

    /// Fingerprint built from stat data only
    pub fn from_metadata(modified: Option<SystemTime>, size: u64) -> Self {
        Self {
            modified,
            size,
            content: None,
        }
    }

    pub fn with_content(mut self, content: ContentHash) -> Self {
        self.content = Some(content);
        self
    }
}

/// One file or folder recorded in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    path: PathBuf,
    kind: ItemKind,
    fingerprint: Fingerprint,
}

impl TreeItem {
    pub fn file(path: PathBuf, fingerprint: Fingerprint) -> Self {
        Self {
            path,
            kind: ItemKind::File,
            fingerprint,
        }
    }

    pub fn folder(path: PathBuf) -> Self {
        Self {
            path,
            kind: ItemKind::Folder,
            fingerprint: Fingerprint::FOLDER,
        }
    }

    /// Root-relative path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Final path segment, if the path has one
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Whether `other` describes the same entry in the same state
    pub(crate) fn same_state(&self, other: &TreeItem) -> bool {
        self.kind == other.kind && self.fingerprint == other.fingerprint
    }
}
