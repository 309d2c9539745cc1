//! Pattern-based path filter for scans.
//!
//! Built-in defaults are always applied. Extra patterns come from
//! configuration, and the root's `.gitignore` can be folded in. Patterns use
//! full gitignore syntax through the `ignore` crate: wildcards, character
//! classes, `**`, anchoring with a leading `/`, folder-only patterns with a
//! trailing `/` and `!` negation. Later patterns win over earlier ones.

use crate::error::ApiError;
use crate::tree::filter::PathFilter;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

/// Built-in ignore patterns
pub const BUILTIN_DEFAULTS: &[&str] = &[".git", "target", "node_modules", ".DS_Store"];

/// Path filter rejecting entries matched by an ignore pattern
#[derive(Debug, Clone)]
pub struct PatternFilter {
    matcher: Gitignore,
}

impl PatternFilter {
    /// Filter from explicit patterns only
    pub fn new<I, S>(patterns: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compile(Path::new(""), patterns, None)
    }

    /// Filter from the built-in defaults
    pub fn with_defaults() -> Result<Self, ApiError> {
        Self::new(BUILTIN_DEFAULTS)
    }

    /// Filter for a snapshot root: defaults, then `extra`, then the root's
    /// `.gitignore` when `use_gitignore` is set.
    pub fn for_root(root: &Path, extra: &[String], use_gitignore: bool) -> Result<Self, ApiError> {
        let gitignore = root.join(".gitignore");
        let gitignore = (use_gitignore && gitignore.is_file()).then_some(gitignore);
        let patterns = BUILTIN_DEFAULTS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str));
        Self::compile(root, patterns, gitignore.as_deref())
    }

    fn compile<I, S>(root: &Path, patterns: I, gitignore: Option<&Path>) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add_line(None, pattern).map_err(|e| {
                ApiError::ConfigError(format!("Invalid ignore pattern '{}': {}", pattern, e))
            })?;
        }

        if let Some(path) = gitignore {
            // Unparseable lines are reported but do not discard the rest of the file
            if let Some(e) = builder.add(path) {
                warn!(path = %path.display(), error = %e, "Skipped invalid .gitignore lines");
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to compile ignore patterns: {}", e)))?;
        debug!(patterns = matcher.len(), "Compiled ignore patterns");
        Ok(Self { matcher })
    }

    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }
}

impl PathFilter for PatternFilter {
    fn accepts_path(&self, relative: &Path, is_folder: bool) -> bool {
        !self.matcher.matched(relative, is_folder).is_ignore()
    }
}
