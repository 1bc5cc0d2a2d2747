//! Vela compile pipeline
//!
//! Orchestrates the template-aware build of a Vela project:
//! - Root path resolution and output redirection
//! - Two-phase compilation (analyze + generate, then rebuild and emit)
//! - Provenance manifest mapping every emitted artifact to its sources
//! - Capability traits for the external checker and template front end
//!
//! The type checker, template parser, and platform bootstrap are external
//! collaborators injected through the `Toolchain` trait; see the
//! `compiler` module for the `compile()` entry point.

pub mod codegen;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod manifest;
pub mod options;
pub mod outputs;
pub mod paths;
pub mod platform;
pub mod program;
pub mod roots;
pub mod template;

// Re-export main types
pub use compiler::{CompilePhase, Compiler};
pub use diagnostics::{assert_no_diagnostics, assert_program_valid, Diagnostic, Severity};
pub use error::{BuildError, BuildResult};
pub use host::{CompilerHost, DiskHost, EmitWriter, HostWriter, MetadataHost, TrackedWriter};
pub use manifest::BuildManifest;
pub use options::{
    resolve_entry_module, resolve_options, CheckerOptions, CodegenOptions, ResolvedOptions,
};
pub use outputs::redirect_outputs;
pub use platform::{create_platform, PlatformHandle, Provider};
pub use program::{Program, Toolchain};
pub use roots::source_roots;
pub use template::{
    fallback_source, AnalyzedModule, GeneratedModule, TemplateAnalyzer, TemplateHost,
};

// Re-export the project types for convenience
pub use vela_config::{Project, ProjectConfig};
