//! Inclusion filter consulted once per walked entry

use std::path::Path;

/// Decides whether a walked entry belongs in a snapshot.
///
/// Implementations must be pure and cheap: the walker calls them for every
/// entry it visits. A rejected folder is pruned together with its contents.
pub trait PathFilter {
    /// Decide on the entry's basename alone. Accepts everything by default.
    fn accepts_file_name(&self, name: &str, is_folder: bool) -> bool {
        let _ = (name, is_folder);
        true
    }

    /// Decide on the entry's root-relative path.
    fn accepts_path(&self, relative: &Path, is_folder: bool) -> bool;

    /// Both checks, basename first.
    fn accepts(&self, relative: &Path, is_folder: bool) -> bool {
        let name_ok = match relative.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.accepts_file_name(name, is_folder),
            None => true,
        };
        name_ok && self.accepts_path(relative, is_folder)
    }
}

impl<F> PathFilter for F
where
    F: Fn(&Path, bool) -> bool,
{
    fn accepts_path(&self, relative: &Path, is_folder: bool) -> bool {
        self(relative, is_folder)
    }
}

/// Filter that keeps every entry
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PathFilter for AcceptAll {
    fn accepts_path(&self, _relative: &Path, _is_folder: bool) -> bool {
        true
    }
}
