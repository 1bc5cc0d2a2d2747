//! Integration tests for the compile pipeline
//!
//! Drives `Compiler::compile()` over a fake toolchain: in-memory host,
//! scripted diagnostics, and a template analyzer with a fixed component
//! set, against real project directories on disk.

use vela_build::{
    AnalyzedModule, BuildError, BuildResult, CheckerOptions, CodegenOptions, Compiler,
    CompilerHost, Diagnostic, EmitWriter, GeneratedModule, Program, Project, TemplateAnalyzer,
    TemplateHost, Toolchain,
};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a project directory with the given source files
fn create_test_project(files: &[(&str, &str)]) -> (TempDir, Project) {
    let dir = tempfile::tempdir().unwrap();

    let manifest = r#"
[package]
name = "test-project"
version = "0.1.0"

[build]
entry = "src/main#App"
"#;
    fs::write(dir.path().join("vela.toml"), manifest).unwrap();

    for (file_path, content) in files {
        let full_path = dir.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    let project = Project::open(dir.path()).unwrap();
    (dir, project)
}

/// Observations shared between the fake toolchain's components
#[derive(Default, Clone)]
struct SharedLog {
    writes: Arc<Mutex<Vec<(PathBuf, String)>>>,
    program_inputs: Arc<Mutex<Vec<Vec<String>>>>,
    program_options: Arc<Mutex<Vec<CheckerOptions>>>,
}

impl SharedLog {
    fn written_paths(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }
}

struct FakeHost {
    log: SharedLog,
}

impl CompilerHost for FakeHost {
    fn write_file(
        &self,
        path: &Path,
        text: &str,
        _bom: bool,
        _contributing: &[String],
    ) -> io::Result<()> {
        self.log
            .writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }

    fn canonical_file_name(&self, name: &str) -> String {
        name.to_string()
    }
}

struct FakeProgram {
    files: Vec<String>,
    options: CheckerOptions,
    diagnostics: Vec<Diagnostic>,
    emit_diagnostics: Vec<Diagnostic>,
}

impl Program for FakeProgram {
    fn source_files(&self) -> Vec<String> {
        self.files.clone()
    }

    fn options(&self) -> &CheckerOptions {
        &self.options
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.clone()
    }

    fn emit(&self, writer: &mut dyn EmitWriter) -> Vec<Diagnostic> {
        for file in &self.files {
            let stem = Path::new(file)
                .file_stem()
                .unwrap()
                .to_string_lossy()
                .into_owned();
            let out = self.options.out_dir.join(format!("{stem}.js"));
            writer
                .write(&out, &format!("// compiled from {file}\n"), false, std::slice::from_ref(file))
                .unwrap();
        }

        self.emit_diagnostics.clone()
    }
}

struct FakeTemplateHost {
    out_dir: PathBuf,
}

impl TemplateHost for FakeTemplateHost {
    fn calculate_emit_path(&self, generated_file_url: &str) -> PathBuf {
        self.out_dir
            .join(Path::new(generated_file_url).file_name().unwrap())
    }
}

struct FakeAnalyzer {
    components: Vec<String>,
    fail: bool,
}

impl TemplateAnalyzer for FakeAnalyzer {
    async fn analyze_modules(&self, files: &[String]) -> BuildResult<Vec<AnalyzedModule>> {
        if self.fail {
            return Err(BuildError::analysis("template parse error"));
        }

        Ok(files
            .iter()
            .filter(|f| self.components.iter().any(|c| f.ends_with(c.as_str())))
            .map(|f| AnalyzedModule {
                module_url: f.clone(),
            })
            .collect())
    }

    fn emit_all_impls(&self, analyzed: &[AnalyzedModule]) -> Vec<GeneratedModule> {
        analyzed
            .iter()
            .map(|m| GeneratedModule {
                source_file_url: m.module_url.clone(),
                generated_file_url: m.module_url.replace(".vela", ".view.vela"),
                text: None,
            })
            .collect()
    }
}

#[derive(Default)]
struct FakeToolchain {
    log: SharedLog,
    initial_diagnostics: Vec<Diagnostic>,
    emit_diagnostics: Vec<Diagnostic>,
    components: Vec<String>,
    fail_analysis: bool,
}

impl FakeToolchain {
    fn with_components(components: &[&str]) -> Self {
        Self {
            components: components.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Toolchain for FakeToolchain {
    type Host = FakeHost;
    type Program = FakeProgram;
    type TemplateHost = FakeTemplateHost;
    type Analyzer = FakeAnalyzer;

    fn create_host(&self, _options: &CheckerOptions) -> FakeHost {
        FakeHost {
            log: self.log.clone(),
        }
    }

    fn create_program(
        &self,
        files: &[String],
        options: &CheckerOptions,
        _host: &dyn CompilerHost,
        old_program: Option<&FakeProgram>,
    ) -> BuildResult<FakeProgram> {
        self.log
            .program_inputs
            .lock()
            .unwrap()
            .push(files.to_vec());
        self.log.program_options.lock().unwrap().push(options.clone());

        Ok(FakeProgram {
            files: files.to_vec(),
            options: options.clone(),
            // Scripted diagnostics apply to the initial program only.
            diagnostics: if old_program.is_none() {
                self.initial_diagnostics.clone()
            } else {
                Vec::new()
            },
            emit_diagnostics: self.emit_diagnostics.clone(),
        })
    }

    fn create_template_compiler(
        &self,
        _host: &FakeHost,
        _program: &FakeProgram,
        options: &CodegenOptions,
        _source_roots: &[PathBuf],
    ) -> (FakeTemplateHost, FakeAnalyzer) {
        (
            FakeTemplateHost {
                out_dir: options.out_dir.clone(),
            },
            FakeAnalyzer {
                components: self.components.clone(),
                fail: self.fail_analysis,
            },
        )
    }
}

const MAIN: &str = "app Main {}";
const APP: &str = "component App { template \"<main>{title}</main>\" }";

#[tokio::test]
async fn test_compile_produces_complete_manifest() {
    let (_dir, project) =
        create_test_project(&[("src/main.vela", MAIN), ("src/app.vela", APP)]);
    let toolchain = FakeToolchain::with_components(&["app.vela"]);
    let log = toolchain.log.clone();

    let manifest = Compiler::new(&project, toolchain).compile().await.unwrap();

    let base = project.base_path.clone();
    let out = base.join("target/vela");

    // Codegen provenance: generated companion traced to its component.
    assert_eq!(
        manifest.sources_of(&out.join("app.view.vela")).unwrap(),
        &[base.join("src/app.vela").to_string_lossy().into_owned()]
    );

    // Emission provenance: one entry per compiled module.
    assert!(manifest.sources_of(&out.join("main.js")).is_some());
    assert!(manifest.sources_of(&out.join("app.js")).is_some());
    assert!(manifest.sources_of(&out.join("app.view.js")).is_some());
    assert_eq!(manifest.len(), 4);

    // Every emitted path names at least one contributing module.
    for file in manifest.emitted_files() {
        assert!(!manifest.sources_of(Path::new(file)).unwrap().is_empty());
    }

    // Entry identity resolved against the program, project untouched.
    assert_eq!(
        manifest.entry_module(),
        format!("{}#App", base.join("src/main.vela").display())
    );
    assert_eq!(project.entry_module, "src/main#App");

    // Root sets.
    assert_eq!(manifest.source_roots(), &[base.join("src")]);
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        manifest.output_roots(),
        &[out.clone(), cwd.join("target/vela"), cwd]
    );

    // Combined source set: originals plus generated, no dedup.
    let inputs = log.program_inputs.lock().unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[1].len(), inputs[0].len() + 1);
    assert_eq!(
        inputs[1].last().unwrap(),
        &out.join("app.view.vela").to_string_lossy().into_owned()
    );

    // Physical writes: generated companion, three modules, three metadata
    // artifacts from the metadata decorator.
    let written = log.written_paths();
    assert_eq!(written.len(), 7);
    assert!(written.contains(&out.join("app.view.vela")));
    assert!(written.contains(&out.join("app.meta.json")));
    assert!(written.contains(&out.join("app.view.meta.json")));
}

#[tokio::test]
async fn test_compile_is_deterministic() {
    let (_dir, project) =
        create_test_project(&[("src/main.vela", MAIN), ("src/app.vela", APP)]);

    let first = Compiler::new(&project, FakeToolchain::with_components(&["app.vela"]))
        .compile()
        .await
        .unwrap();
    let second = Compiler::new(&project, FakeToolchain::with_components(&["app.vela"]))
        .compile()
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_initial_diagnostics_fail_before_codegen() {
    let (_dir, project) = create_test_project(&[("src/main.vela", "app Main {")]);
    let toolchain = FakeToolchain {
        initial_diagnostics: vec![Diagnostic::error("unexpected end of file")],
        ..FakeToolchain::with_components(&["main.vela"])
    };
    let log = toolchain.log.clone();

    let err = Compiler::new(&project, toolchain).compile().await.unwrap_err();

    assert!(matches!(err, BuildError::Configuration(_)));
    // Short-circuit: no generated file was ever written.
    assert!(log.written_paths().is_empty());
}

#[tokio::test]
async fn test_unresolved_entry_module_fails() {
    let (dir, _) = create_test_project(&[("src/main.vela", MAIN)]);
    let project = Project::open(dir.path())
        .unwrap()
        .with_entry_module("src/missing#App");

    let err = Compiler::new(&project, FakeToolchain::default())
        .compile()
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::EntryResolution { .. }));
}

#[tokio::test]
async fn test_emission_diagnostics_discard_manifest() {
    let (_dir, project) =
        create_test_project(&[("src/main.vela", MAIN), ("src/app.vela", APP)]);
    let toolchain = FakeToolchain {
        emit_diagnostics: vec![
            Diagnostic::error("property 'title' does not exist").with_file("src/app.view.vela"),
        ],
        ..FakeToolchain::with_components(&["app.vela"])
    };

    let err = Compiler::new(&project, toolchain).compile().await.unwrap_err();
    assert!(matches!(err, BuildError::EmissionDiagnostics(_)));
}

#[tokio::test]
async fn test_analysis_failure_propagates() {
    let (_dir, project) = create_test_project(&[("src/main.vela", MAIN)]);
    let toolchain = FakeToolchain {
        fail_analysis: true,
        ..FakeToolchain::default()
    };

    let err = Compiler::new(&project, toolchain).compile().await.unwrap_err();
    assert!(matches!(err, BuildError::Analysis(_)));
}

#[tokio::test]
async fn test_working_path_redirects_outputs() {
    let (dir, _) = create_test_project(&[("src/main.vela", MAIN), ("src/app.vela", APP)]);
    let deploy = tempfile::tempdir().unwrap();
    let project = Project::open(dir.path())
        .unwrap()
        .with_working_path(deploy.path());

    let toolchain = FakeToolchain::with_components(&["app.vela"]);
    let log = toolchain.log.clone();

    let manifest = Compiler::new(&project, toolchain).compile().await.unwrap();

    let configured = project.base_path.join("target/vela");
    let redirected = deploy.path().join("target/vela");

    assert_eq!(
        manifest.output_roots(),
        &[
            configured,
            redirected.clone(),
            std::env::current_dir().unwrap(),
        ]
    );

    // The rebuilt program was handed the redirected output directory and
    // artifacts land under it, generated companion included.
    let options = log.program_options.lock().unwrap();
    assert_eq!(options[1].out_dir, redirected);
    let written = log.written_paths();
    assert!(written.contains(&redirected.join("app.view.vela")));
    assert!(written.contains(&redirected.join("main.js")));

    // Manifest paths relativize against the redirected root.
    assert_eq!(
        manifest.relativize(&redirected.join("main.js")),
        PathBuf::from("main.js")
    );
}
