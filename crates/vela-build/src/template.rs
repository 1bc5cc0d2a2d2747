//! Template front-end boundary.
//!
//! Template markup itself is parsed elsewhere; the pipeline only needs
//! the analyzer's module collection, the generated-module descriptors,
//! and the front end's emit-path canonicalization.

use crate::error::BuildResult;

use std::path::PathBuf;

/// A component module the analyzer found to require a generated companion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedModule {
    /// Canonical file name of the component module
    pub module_url: String,
}

/// A generated companion module produced from template markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Canonical file name of the originating source module
    pub source_file_url: String,
    /// Front-end identity of the generated module
    pub generated_file_url: String,
    /// Pre-rendered companion source, if the front end produced one
    pub text: Option<String>,
}

/// Emit-path canonicalization owned by the template front end
pub trait TemplateHost {
    fn calculate_emit_path(&self, generated_file_url: &str) -> PathBuf;
}

/// The external template analyzer. Analysis is the pipeline's single
/// await point; its result ordering is treated as deterministic for a
/// fixed input set.
#[allow(async_fn_in_trait)]
pub trait TemplateAnalyzer {
    /// Analyze every module of the program for template-bearing
    /// components. Called exactly once per compile.
    async fn analyze_modules(&self, files: &[String]) -> BuildResult<Vec<AnalyzedModule>>;

    /// Materialize generated companion modules for the analyzed set,
    /// preserving analysis order
    fn emit_all_impls(&self, analyzed: &[AnalyzedModule]) -> Vec<GeneratedModule>;
}

/// Fallback textual rendering for generated modules the front end did
/// not pre-render.
pub fn fallback_source(generated: &GeneratedModule) -> String {
    format!(
        "// Generated companion module. Do not edit.\nuse \"{}\"\n\nview {{}}\n",
        generated.source_file_url
    )
}
