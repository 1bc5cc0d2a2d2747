//! Vela project configuration
//!
//! Provides the project description consumed by the compile pipeline:
//! - Project configuration (vela.toml)
//! - The `Project` handle (base path, working path, entry module hint)
//! - Validation of build and compiler sections

pub mod project;

pub use project::{
    BuildSection, CompilerSection, PackageSection, Project, ProjectConfig,
};

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        #[source]
        error: toml::de::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
