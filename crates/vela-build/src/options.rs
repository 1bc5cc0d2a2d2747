//! Deriving the compiler option pair and entry source set from a project,
//! and resolving the designated entry module against a constructed program.

use crate::error::{BuildError, BuildResult};
use crate::paths::make_absolute;
use crate::program::Program;

use std::path::{Path, PathBuf};
use vela_config::Project;
use walkdir::WalkDir;

/// Source file extension compiled by the pipeline
pub const SOURCE_EXTENSION: &str = "vela";

/// Options consumed by the type checker. Derived once per compile;
/// only the output redirect rewrites `out_dir` afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Configured output directory (absolute)
    pub out_dir: PathBuf,
    /// Primary root directory for path relativization
    pub root_dir: Option<PathBuf>,
    /// Additional root directories, project-relative or absolute
    pub root_dirs: Vec<PathBuf>,
    /// Emit declaration outputs alongside modules
    pub declarations: bool,
}

/// Options consumed by the template code generator. `out_dir` is kept in
/// lock-step with the checker options by the output remapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Output directory for generated companion modules (absolute)
    pub out_dir: PathBuf,
    /// Whether template analysis is enabled
    pub templates: bool,
}

/// The option pair plus the entry source file list, derived from a project
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub checker: CheckerOptions,
    pub codegen: CodegenOptions,
    pub entry_sources: Vec<PathBuf>,
}

/// Derive checker options, codegen options, and the entry source set from
/// the project configuration.
pub fn resolve_options(project: &Project) -> BuildResult<ResolvedOptions> {
    let base = project.base_path.as_path();
    let out_dir = make_absolute(base, &project.config.output_dir());
    let source_dir = make_absolute(base, &project.config.source_dir());

    let compiler = project.config.compiler.clone().unwrap_or_default();

    let checker = CheckerOptions {
        out_dir: out_dir.clone(),
        root_dir: Some(source_dir.clone()),
        root_dirs: project.config.root_dirs().to_vec(),
        declarations: compiler.declarations.unwrap_or(false),
    };

    let codegen = CodegenOptions {
        out_dir,
        templates: compiler.templates.unwrap_or(true),
    };

    let entry_sources = discover_sources(&source_dir)?;
    if entry_sources.is_empty() {
        return Err(BuildError::Configuration(format!(
            "no .{} source files found under {}",
            SOURCE_EXTENSION,
            source_dir.display()
        )));
    }

    Ok(ResolvedOptions {
        checker,
        codegen,
        entry_sources,
    })
}

/// Discover source files under the source directory, sorted for
/// deterministic program construction.
fn discover_sources(source_dir: &Path) -> BuildResult<Vec<PathBuf>> {
    if !source_dir.exists() {
        return Err(BuildError::Configuration(format!(
            "source directory not found: {}",
            source_dir.display()
        )));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(source_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some(SOURCE_EXTENSION) {
                sources.push(path.to_path_buf());
            }
        }
    }

    sources.sort();
    Ok(sources)
}

/// Resolve the entry-module hint ("relative/module#Export") against the
/// program. Returns the canonical entry identity
/// "<absolute module file>#<Export>".
pub fn resolve_entry_module<P: Program>(
    program: &P,
    base_path: &Path,
    hint: &str,
) -> BuildResult<String> {
    let (module_path, export) = hint
        .split_once('#')
        .ok_or_else(|| BuildError::entry_resolution(hint, "missing '#Export' suffix"))?;

    if module_path.is_empty() || export.is_empty() {
        return Err(BuildError::entry_resolution(
            hint,
            "module path and export name must both be non-empty",
        ));
    }

    let module_file = make_absolute(base_path, Path::new(module_path))
        .with_extension(SOURCE_EXTENSION)
        .to_string_lossy()
        .into_owned();

    if !program.has_source_file(&module_file) {
        return Err(BuildError::entry_resolution(
            hint,
            format!("module '{module_file}' is not part of the program"),
        ));
    }

    Ok(format!("{module_file}#{export}"))
}
