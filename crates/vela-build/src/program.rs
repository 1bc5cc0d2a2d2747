//! Program and toolchain capability boundaries.
//!
//! The type checker and its program model are external collaborators;
//! the pipeline sees them only through these narrow traits so real and
//! fake toolchains are interchangeable.

use crate::diagnostics::Diagnostic;
use crate::error::BuildResult;
use crate::host::{CompilerHost, EmitWriter};
use crate::options::{CheckerOptions, CodegenOptions};
use crate::template::{TemplateAnalyzer, TemplateHost};

use std::path::PathBuf;

/// A constructed program over a fixed source set
pub trait Program {
    /// Canonical file names of every module in the program, in
    /// construction order
    fn source_files(&self) -> Vec<String>;

    /// Whether the program contains the named module
    fn has_source_file(&self, name: &str) -> bool {
        self.source_files().iter().any(|f| f == name)
    }

    /// The checker options the program was constructed with
    fn options(&self) -> &CheckerOptions;

    /// Diagnostics known without emitting (options, syntax, semantics)
    fn diagnostics(&self) -> Vec<Diagnostic>;

    /// Type-check and emit every output through `writer`, returning the
    /// diagnostics produced along the way
    fn emit(&self, writer: &mut dyn EmitWriter) -> Vec<Diagnostic>;
}

/// Factory boundary for the external toolchain: host construction,
/// program construction, and the template-aware front end.
pub trait Toolchain {
    type Host: CompilerHost;
    type Program: Program;
    type TemplateHost: TemplateHost;
    type Analyzer: TemplateAnalyzer;

    fn create_host(&self, options: &CheckerOptions) -> Self::Host;

    /// Construct a program over `files`. `old_program` allows the
    /// toolchain to reuse state from the pre-codegen program when
    /// rebuilding over the combined source set.
    fn create_program(
        &self,
        files: &[String],
        options: &CheckerOptions,
        host: &dyn CompilerHost,
        old_program: Option<&Self::Program>,
    ) -> BuildResult<Self::Program>;

    /// Create the template front end for a constructed program
    fn create_template_compiler(
        &self,
        host: &Self::Host,
        program: &Self::Program,
        options: &CodegenOptions,
        source_roots: &[PathBuf],
    ) -> (Self::TemplateHost, Self::Analyzer);
}
