//! Template code generation.
//!
//! Phase one hands the canonical name of every program module to the
//! external analyzer in a single call; phase two materializes each
//! generated companion, persists it through the host write capability,
//! and records its provenance in the manifest.

use crate::error::BuildResult;
use crate::host::CompilerHost;
use crate::manifest::BuildManifest;
use crate::program::Program;
use crate::template::{fallback_source, TemplateAnalyzer, TemplateHost};

use log::debug;

/// Run both codegen phases. Returns the generated emit paths in analysis
/// order, ready to be appended to the original source set.
pub async fn generate_template_code<H, T, A, P>(
    host: &H,
    template_host: &T,
    analyzer: &A,
    program: &P,
    manifest: &mut BuildManifest,
) -> BuildResult<Vec<String>>
where
    H: CompilerHost + ?Sized,
    T: TemplateHost,
    A: TemplateAnalyzer,
    P: Program,
{
    let file_names: Vec<String> = program
        .source_files()
        .iter()
        .map(|f| host.canonical_file_name(f))
        .collect();

    let analyzed = analyzer.analyze_modules(&file_names).await?;
    debug!("analyzed {} component module(s)", analyzed.len());

    let generated = analyzer.emit_all_impls(&analyzed);

    let mut emit_paths = Vec::with_capacity(generated.len());
    for module in &generated {
        let emit_path = template_host.calculate_emit_path(&module.generated_file_url);
        let text = match &module.text {
            Some(text) => text.clone(),
            None => fallback_source(module),
        };

        // A failed write here is not surfaced: the emission pass over the
        // rebuilt program reports a missing companion as a diagnostic.
        let _ = host.write_file(
            &emit_path,
            &text,
            false,
            std::slice::from_ref(&module.source_file_url),
        );

        manifest.record(&emit_path, std::slice::from_ref(&module.source_file_url));
        emit_paths.push(emit_path.to_string_lossy().into_owned());
    }

    Ok(emit_paths)
}
