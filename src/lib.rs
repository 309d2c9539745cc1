//! fstree: Filesystem Snapshots and Change Sets
//!
//! Snapshots a directory subtree into an immutable, queryable [`tree::FsTree`]
//! and computes which paths changed between two snapshots of the same root,
//! so a build or sync tool can decide what work to redo.

pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod tree;

pub use error::{ApiError, TreeError};
pub use tree::{FsTree, PathFilter, TreeDiff, TreeItem};
