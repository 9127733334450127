//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$BASALT_BUILD_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/basalt-build/config.toml`
//! 3. `~/.basalt-build/config.toml`
//!
//! # Project Config
//!
//! Located at `basalt-build.toml` in the project directory.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the package version
//! must have the `MAJOR.MINOR.PATCH` shape).

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::version::check_version_triple;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// cmake = "/usr/local/bin/cmake"
/// python = "/usr/bin/python3"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// CMake executable to invoke
    pub cmake: Option<PathBuf>,

    /// Python interpreter passed to CMake
    pub python: Option<PathBuf>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cmake) = &self.cmake {
            if cmake.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("cmake cannot be empty".into()));
            }
        }
        if let Some(python) = &self.python {
            if python.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("python cannot be empty".into()));
            }
        }
        Ok(())
    }
}

/// Project configuration, read from `basalt-build.toml`.
///
/// # Example
///
/// ```toml
/// [package]
/// name = "basalt"
/// version = "0.1.0"
///
/// [package.entry_points]
/// basalt-cli = "basalt.cli:main"
///
/// [[extension]]
/// name = "basalt"
/// source_dir = "."
///
/// [build]
/// option_prefix = "Basalt"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package metadata
    pub package: PackageConfig,

    /// Native extensions, built in declaration order
    #[serde(rename = "extension")]
    pub extensions: Vec<ExtensionConfig>,

    /// Build settings
    pub build: BuildSettings,
}

impl ProjectConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.package.validate()?;

        let mut seen = HashSet::new();
        for ext in &self.extensions {
            ext.validate()?;
            if !seen.insert(ext.name.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "duplicate extension name '{}'",
                    ext.name
                )));
            }
        }

        self.build.validate()
    }
}

/// Package metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Distribution name
    pub name: String,

    /// Distribution version, embedded into the native build
    pub version: String,

    /// One-line description
    pub description: Option<String>,

    /// Console scripts, name to `module:function`
    pub entry_points: BTreeMap<String, String>,
}

impl PackageConfig {
    /// Validate the package metadata.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "package name cannot be empty".into(),
            ));
        }

        check_version_triple("package", &self.version)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        for (script, target) in &self.entry_points {
            if script.is_empty() || !target.contains(':') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid entry point '{} = {}', expected 'name = \"module:function\"'",
                    script, target
                )));
            }
        }

        Ok(())
    }
}

/// A declared native extension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Extension name
    pub name: String,

    /// CMake project root, relative to the project directory
    pub source_dir: Option<PathBuf>,

    /// CMake target (default: `_<name>`)
    pub target: Option<String>,
}

impl ExtensionConfig {
    /// Validate the extension entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "extension name cannot be empty".into(),
            ));
        }
        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(ConfigError::InvalidValue(format!(
                "extension name '{}' must be a single path component",
                self.name
            )));
        }
        if let Some(target) = &self.target {
            if target.is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "extension '{}' has an empty target",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// CMake executable (overrides global config)
    pub cmake: Option<PathBuf>,

    /// Python interpreter (overrides global config)
    pub python: Option<PathBuf>,

    /// Prefix of the project's CMake options (default: "Basalt")
    pub option_prefix: Option<String>,

    /// Scratch build directory (default: "build/temp")
    pub build_temp: Option<PathBuf>,

    /// Root under which extensions are placed (default: "build/lib")
    pub extension_root: Option<PathBuf>,
}

impl BuildSettings {
    /// Validate the build settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.option_prefix {
            let valid = !prefix.is_empty()
                && prefix
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid option prefix '{}', must be a CMake identifier",
                    prefix
                )));
            }
        }
        Ok(())
    }
}
