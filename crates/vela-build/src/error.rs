/// Build pipeline error types
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Project has blocking diagnostics before code generation: {0}")]
    Configuration(String),

    #[error("Entry module '{module}' could not be resolved: {reason}")]
    EntryResolution { module: String, reason: String },

    #[error("Template analysis failed: {0}")]
    Analysis(String),

    #[error("Emission produced blocking diagnostics: {0}")]
    EmissionDiagnostics(String),

    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] vela_config::ConfigError),
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create an entry resolution error
    pub fn entry_resolution(module: impl Into<String>, reason: impl ToString) -> Self {
        Self::EntryResolution {
            module: module.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an analysis failure
    pub fn analysis(message: impl ToString) -> Self {
        Self::Analysis(message.to_string())
    }
}
