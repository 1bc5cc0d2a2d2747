//! Source root resolution.
//!
//! Turns the checker options' root directories into the ordered list of
//! absolute source roots recorded in the manifest. Order is the input
//! order (primary root first), empty entries are dropped, and duplicates
//! are kept so downstream prefix-stripping sees every configured root.

use crate::options::CheckerOptions;
use crate::paths::make_absolute;

use std::path::{Path, PathBuf};

/// Resolve the ordered source root set. Pure; no filesystem access.
pub fn source_roots(base_path: &Path, options: &CheckerOptions) -> Vec<PathBuf> {
    options
        .root_dir
        .iter()
        .chain(options.root_dirs.iter())
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| make_absolute(base_path, p))
        .collect()
}
