//! Filesystem snapshots
//!
//! Walks a directory once into an immutable [`FsTree`], answers basename and
//! path-suffix lookups from indexes built at construction, and diffs two
//! snapshots of the same root.

pub mod diff;
pub mod filter;
pub mod hasher;
pub mod item;
pub mod lookup;
pub mod path;
pub mod snapshot;
pub mod walker;

pub use diff::TreeDiff;
pub use filter::{AcceptAll, PathFilter};
pub use item::{Fingerprint, ItemKind, TreeItem};
pub use snapshot::FsTree;
pub use walker::{DiskWalker, EntrySource, FingerprintMode, WalkEntry, WalkerConfig};
