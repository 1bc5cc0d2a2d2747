//! Pure path helpers shared by root resolution and output remapping.

use std::path::{Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute.
///
/// No filesystem access; the result is a lexical join, not a
/// canonicalized path.
pub fn make_absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Express `path` relative to `base`, falling back to `path` itself when
/// no relative form exists.
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
