//! Read-only lookups over a snapshot's indexes

use crate::tree::path;
use crate::tree::snapshot::FsTree;
use std::cmp::Reverse;
use std::path::Path;

impl FsTree {
    fn files_named(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any file has basename `name`
    pub fn contains_file_named(&self, name: &str) -> bool {
        !self.files_named(name).is_empty()
    }

    /// One file with basename `name`.
    ///
    /// When several files share the name, the lexicographically smallest
    /// root-relative path is returned.
    pub fn path_of_file_named(&self, name: &str) -> Option<&Path> {
        self.files_named(name)
            .first()
            .map(|idx| self.items[*idx].path())
    }

    /// All files with basename `name`, sorted by path
    pub fn paths_of_files_named(&self, name: &str) -> Vec<&Path> {
        self.files_named(name)
            .iter()
            .map(|idx| self.items[*idx].path())
            .collect()
    }

    /// All files whose basename equals `name` after NFC normalization of
    /// both sides, sorted by path.
    ///
    /// Unlike [`FsTree::paths_of_files_named`], composed and decomposed
    /// spellings of the same name match each other, so returned basenames
    /// may differ from `name` byte-wise.
    pub fn paths_of_files_named_normalized(&self, name: &str) -> Vec<&Path> {
        self.by_normalized_name
            .get(&path::normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|idx| self.items[*idx].path())
            .collect()
    }

    /// All files whose basename satisfies `predicate`, in walk order
    pub fn paths_of_files_matching<P>(&self, predicate: P) -> Vec<&Path>
    where
        P: Fn(&str) -> bool,
    {
        self.files
            .iter()
            .map(|idx| &self.items[*idx])
            .filter(|item| item.file_name().map_or(false, &predicate))
            .map(|item| item.path())
            .collect()
    }

    /// The file whose path ends with `suffix` on a component boundary.
    ///
    /// `Sources/Foo.h` matches `Lib/Sources/Foo.h` but not
    /// `Lib/MySources/Foo.h`. Among several matches the one sharing the most
    /// leading components with `preferring_subtree` wins, so a match inside
    /// the subtree beats any match outside it; remaining ties go to the
    /// lexicographically smallest path. `preferring_subtree` may be
    /// root-relative or an absolute path under the snapshot root.
    pub fn path_of_best_file_matching_path_suffix(
        &self,
        suffix: impl AsRef<Path>,
        preferring_subtree: impl AsRef<Path>,
    ) -> Option<&Path> {
        let suffix = path::relative_components(suffix.as_ref());
        let name = suffix.file_name()?.to_str()?;
        let subtree = path::resolve_subtree(self.root_path(), preferring_subtree.as_ref());

        self.files_named(name)
            .iter()
            .map(|idx| self.items[*idx].path())
            .filter(|candidate| candidate.ends_with(&suffix))
            .min_by_key(|candidate| {
                (
                    Reverse(path::shared_prefix_len(candidate, &subtree)),
                    *candidate,
                )
            })
    }
}
