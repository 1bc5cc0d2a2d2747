//! Output path remapping.
//!
//! Separates the directory the checker writes into from where a
//! deployment wants the artifact tree to live. When a working path is
//! configured, the effective output directory on both option values is
//! re-based under it; the returned root set always has three entries so
//! downstream consumers can strip whichever prefix matches.

use crate::options::{CheckerOptions, CodegenOptions};
use crate::paths::relative_to;

use std::path::{Path, PathBuf};

/// Apply the working-path redirect and compute the output root set.
///
/// Returns `[configured out dir, out dir re-based under the working path,
/// process working directory]` in that order. The redirect rewrites
/// `out_dir` on both the checker and codegen options only when a working
/// path is configured; the root set is computed either way, falling back
/// to `cwd` as the re-base target.
pub fn redirect_outputs(
    checker: &mut CheckerOptions,
    codegen: &mut CodegenOptions,
    base_path: &Path,
    working_path: Option<&Path>,
    cwd: &Path,
) -> Vec<PathBuf> {
    let rel_out = relative_to(base_path, &checker.out_dir);
    let rebased = working_path.unwrap_or(cwd).join(&rel_out);

    let output_roots = vec![
        checker.out_dir.clone(),
        rebased.clone(),
        cwd.to_path_buf(),
    ];

    if working_path.is_some() {
        checker.out_dir = rebased.clone();
        codegen.out_dir = rebased;
    }

    output_roots
}
