//! Diagnostics reported by the injected checker and the assertions that
//! turn blocking diagnostics into pipeline failures.

use crate::error::{BuildError, BuildResult};
use crate::program::Program;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Whether a diagnostic of this severity aborts the compile
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A diagnostic attributed to the program or one of its modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Canonical file name of the offending module, when known
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            file: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Fail with `Configuration` if the freshly constructed program carries
/// blocking diagnostics. Runs before any generated file is written.
pub fn assert_program_valid<P: Program>(program: &P) -> BuildResult<()> {
    let diagnostics = program.diagnostics();
    let blocking: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.severity.is_blocking())
        .collect();

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(BuildError::Configuration(format_diagnostics(&blocking)))
    }
}

/// Fail with `EmissionDiagnostics` if final emission reported blocking
/// diagnostics over the combined source set.
pub fn assert_no_diagnostics(diagnostics: &[Diagnostic]) -> BuildResult<()> {
    let blocking: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.severity.is_blocking())
        .collect();

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(BuildError::EmissionDiagnostics(format_diagnostics(
            &blocking,
        )))
    }
}

/// Format diagnostics for error messages
fn format_diagnostics(diagnostics: &[&Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| match &d.file {
            Some(file) => format!("{}: {}", file, d.message),
            None => d.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_errors_are_blocking() {
        assert!(!Severity::Info.is_blocking());
        assert!(!Severity::Warning.is_blocking());
        assert!(Severity::Error.is_blocking());
    }

    #[test]
    fn test_warnings_do_not_fail_emission() {
        let diagnostics = vec![Diagnostic::warning("unused component")];
        assert!(assert_no_diagnostics(&diagnostics).is_ok());
    }

    #[test]
    fn test_errors_fail_emission_with_file_context() {
        let diagnostics = vec![
            Diagnostic::warning("unused component"),
            Diagnostic::error("unknown binding 'item'").with_file("/p/src/list.vela"),
        ];

        let err = assert_no_diagnostics(&diagnostics).unwrap_err();
        match err {
            BuildError::EmissionDiagnostics(detail) => {
                assert!(detail.contains("/p/src/list.vela"));
                assert!(detail.contains("unknown binding"));
                assert!(!detail.contains("unused component"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
