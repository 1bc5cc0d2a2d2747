//! Project configuration (vela.toml) and the `Project` handle
//!
//! `ProjectConfig` is the serde model of `vela.toml`. `Project` pairs a
//! loaded configuration with the paths one compile invocation needs: the
//! absolute project base path, an optional deployment working path, and
//! the entry-module hint.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from vela.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageSection>,

    /// Build configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,

    /// Compiler configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<CompilerSection>,
}

/// Package metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version (semver)
    pub version: String,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Output directory (default: "target/vela")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Source directory (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Deployment working directory; when set, emitted artifacts are
    /// redirected under it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working: Option<PathBuf>,

    /// Entry module hint, "relative/module#Export" (default: "src/main#App")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

/// Compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerSection {
    /// Additional root directories for path relativization, project-relative
    /// or absolute
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub root_dirs: Vec<PathBuf>,

    /// Emit declaration outputs alongside modules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarations: Option<bool>,

    /// Enable template analysis of component modules (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<bool>,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(pkg) = &self.package {
            if pkg.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "package.name".to_string(),
                    reason: "name cannot be empty".to_string(),
                });
            }

            if !is_valid_version(&pkg.version) {
                return Err(ConfigError::InvalidValue {
                    field: "package.version".to_string(),
                    reason: format!("invalid version '{}'", pkg.version),
                });
            }
        }

        if let Some(build) = &self.build {
            if let Some(entry) = &build.entry {
                if entry.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "build.entry".to_string(),
                        reason: "entry hint cannot be empty".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Get the configured output directory, with default
    pub fn output_dir(&self) -> PathBuf {
        self.build
            .as_ref()
            .and_then(|b| b.output.clone())
            .unwrap_or_else(|| PathBuf::from("target/vela"))
    }

    /// Get the configured source directory, with default
    pub fn source_dir(&self) -> PathBuf {
        self.build
            .as_ref()
            .and_then(|b| b.source.clone())
            .unwrap_or_else(|| PathBuf::from("src"))
    }

    /// Get the entry module hint, with default
    pub fn entry_hint(&self) -> String {
        self.build
            .as_ref()
            .and_then(|b| b.entry.clone())
            .unwrap_or_else(|| "src/main#App".to_string())
    }

    /// Get the additional root directories
    pub fn root_dirs(&self) -> &[PathBuf] {
        self.compiler
            .as_ref()
            .map(|c| c.root_dirs.as_slice())
            .unwrap_or(&[])
    }
}

/// A project as seen by one compile invocation.
///
/// The pipeline reads this handle but never mutates it; the resolved
/// entry-module identity is returned in the build manifest instead.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute project base path
    pub base_path: PathBuf,
    /// Deployment working path, if artifacts should be redirected
    pub working_path: Option<PathBuf>,
    /// Entry module hint ("relative/module#Export")
    pub entry_module: String,
    /// Loaded configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Create a project from an already-loaded configuration
    pub fn new(base_path: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        let base_path = base_path.into();
        let working_path = config
            .build
            .as_ref()
            .and_then(|b| b.working.clone())
            .map(|w| make_absolute(&base_path, &w));
        let entry_module = config.entry_hint();

        Self {
            base_path,
            working_path,
            entry_module,
            config,
        }
    }

    /// Open a project directory by loading its vela.toml
    pub fn open(dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let dir = dir.as_ref();
        let config = ProjectConfig::load_from_file(&dir.join("vela.toml"))?;
        Ok(Self::new(dir, config))
    }

    /// Override the deployment working path
    pub fn with_working_path(mut self, working: impl Into<PathBuf>) -> Self {
        self.working_path = Some(make_absolute(&self.base_path, &working.into()));
        self
    }

    /// Override the entry module hint
    pub fn with_entry_module(mut self, entry: impl Into<String>) -> Self {
        self.entry_module = entry.into();
        self
    }
}

fn make_absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Basic semver validation (simplified)
fn is_valid_version(version: &str) -> bool {
    let main_version = version.split(['-', '+']).next().unwrap_or("");
    if main_version.is_empty() {
        return false;
    }

    let parts: Vec<&str> = main_version.split('.').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return false;
    }

    parts
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
