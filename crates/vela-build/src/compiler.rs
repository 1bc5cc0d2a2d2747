//! The compile facade.
//!
//! Sequences option resolution, program construction, validation, entry
//! resolution, root computation, template codegen, and the tracked final
//! emission into one `compile()` call that either returns a complete
//! manifest or fails fast with nothing partially exposed.

use crate::codegen::generate_template_code;
use crate::diagnostics::{assert_no_diagnostics, assert_program_valid};
use crate::error::{BuildError, BuildResult};
use crate::host::{CompilerHost, HostWriter, MetadataHost, TrackedWriter};
use crate::manifest::BuildManifest;
use crate::options::{resolve_entry_module, resolve_options, ResolvedOptions};
use crate::outputs::redirect_outputs;
use crate::platform::{create_platform, PlatformHandle, Provider};
use crate::program::{Program, Toolchain};
use crate::roots::source_roots;

use log::{debug, info};
use std::fmt;
use vela_config::Project;

/// Pipeline phase, logged at every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilePhase {
    Idle,
    OptionsResolved,
    ProgramCreated,
    Validated,
    EntryResolved,
    RootsComputed,
    CodegenComplete,
    Emitted,
    Failed,
}

impl fmt::Display for CompilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::OptionsResolved => "options-resolved",
            Self::ProgramCreated => "program-created",
            Self::Validated => "validated",
            Self::EntryResolved => "entry-resolved",
            Self::RootsComputed => "roots-computed",
            Self::CodegenComplete => "codegen-complete",
            Self::Emitted => "emitted",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Compiles one project through an injected toolchain.
///
/// Each `compile()` call owns its option pair and manifest; the caller
/// must not run two compiles over the same project concurrently.
pub struct Compiler<'p, T: Toolchain> {
    project: &'p Project,
    toolchain: T,
}

impl<'p, T: Toolchain> Compiler<'p, T> {
    pub fn new(project: &'p Project, toolchain: T) -> Self {
        Self { project, toolchain }
    }

    /// Bootstrap handle for loading the compiled application
    pub fn create_platform(&self, providers: Vec<Provider>) -> PlatformHandle {
        create_platform(providers)
    }

    /// Run the full pipeline. Fails fast; a manifest is returned only
    /// after emission completed without blocking diagnostics.
    pub async fn compile(&self) -> BuildResult<BuildManifest> {
        match self.run().await {
            Ok(manifest) => Ok(manifest),
            Err(error) => {
                debug!("phase {}: {error}", CompilePhase::Failed);
                Err(error)
            }
        }
    }

    async fn run(&self) -> BuildResult<BuildManifest> {
        let base_path = self.project.base_path.clone();
        self.enter(CompilePhase::Idle);

        let ResolvedOptions {
            mut checker,
            mut codegen,
            entry_sources,
        } = resolve_options(self.project)?;
        self.enter(CompilePhase::OptionsResolved);

        let host = self.toolchain.create_host(&checker);
        let sources: Vec<String> = entry_sources
            .iter()
            .map(|p| host.canonical_file_name(&p.to_string_lossy()))
            .collect();

        let program = self
            .toolchain
            .create_program(&sources, &checker, &host, None)?;
        self.enter(CompilePhase::ProgramCreated);

        assert_program_valid(&program)?;
        self.enter(CompilePhase::Validated);

        let entry_module =
            resolve_entry_module(&program, &base_path, &self.project.entry_module)?;
        self.enter(CompilePhase::EntryResolved);

        let roots = source_roots(&base_path, program.options());
        let cwd = std::env::current_dir().map_err(|e| BuildError::io(".", e))?;
        let output_roots = redirect_outputs(
            &mut checker,
            &mut codegen,
            &base_path,
            self.project.working_path.as_deref(),
            &cwd,
        );

        let mut manifest =
            BuildManifest::new(&base_path, entry_module, roots.clone(), output_roots);
        self.enter(CompilePhase::RootsComputed);

        let (template_host, analyzer) =
            self.toolchain
                .create_template_compiler(&host, &program, &codegen, &roots);

        let generated =
            generate_template_code(&host, &template_host, &analyzer, &program, &mut manifest)
                .await?;
        self.enter(CompilePhase::CodegenComplete);

        // Component modules reference their companions by name, so the
        // program is rebuilt over originals plus generated, no dedup.
        let mut combined = program.source_files();
        combined.extend(generated);

        let metadata_host = MetadataHost::new(&host);
        let rebuilt =
            self.toolchain
                .create_program(&combined, &checker, &metadata_host, Some(&program))?;

        let diagnostics = {
            let mut writer = TrackedWriter::new(&mut manifest, HostWriter::new(&metadata_host));
            rebuilt.emit(&mut writer)
        };
        assert_no_diagnostics(&diagnostics)?;
        self.enter(CompilePhase::Emitted);

        info!(
            "compiled {} module(s), {} artifact(s)",
            combined.len(),
            manifest.len()
        );
        Ok(manifest)
    }

    fn enter(&self, phase: CompilePhase) {
        debug!("phase {phase}");
    }
}
