//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! basalt-build has two configuration scopes:
//! - **Global**: User-level tool locations
//! - **Project**: Package metadata, extensions and build settings
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$BASALT_BUILD_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/basalt-build/config.toml`
//! 3. `~/.basalt-build/config.toml`
//!
//! # Project Config Location
//!
//! `basalt-build.toml` in the project directory.
//!
//! # Example
//!
//! ```no_run
//! use basalt_build::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("cmake: {}", config.cmake().display());
//! for ext in config.extensions().unwrap() {
//!     println!("extension {} at {}", ext.name(), ext.source_root().display());
//! }
//! ```

pub mod schema;

pub use schema::{BuildSettings, ExtensionConfig, GlobalConfig, PackageConfig, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Extension;

/// File name of the project config.
pub const PROJECT_FILE: &str = "basalt-build.toml";

/// Environment variable pointing at a global config file.
pub const CONFIG_ENV: &str = "BASALT_BUILD_CONFIG";

/// Default CMake executable.
pub const DEFAULT_CMAKE: &str = "cmake";

/// Default prefix of project CMake options.
pub const DEFAULT_OPTION_PREFIX: &str = "Basalt";

/// Default scratch build directory, relative to the project.
pub const DEFAULT_BUILD_TEMP: &str = "build/temp";

/// Default extension root, relative to the project.
pub const DEFAULT_EXTENSION_ROOT: &str = "build/lib";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("no {} found in '{}'", PROJECT_FILE, .0.display())]
    ProjectNotFound(PathBuf),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: project settings override global ones.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if found)
    pub project: Option<ProjectConfig>,
    /// Directory relative paths are resolved against
    project_dir: PathBuf,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_dir` is provided, also loads `basalt-build.toml` from it.
    /// Otherwise the current directory is used as the project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or are
    /// invalid. Missing config files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global()?;
        global.validate()?;

        let cwd = std::env::current_dir().unwrap_or_default();
        let dir = match project_dir {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        let (project, project_path) = Self::load_project(&dir)?;
        if let (Some(project), Some(path)) = (&project, &project_path) {
            project.validate()?;
            if project.extensions.is_empty() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "no [[extension]] declared, building '{}' from the project directory",
                        project.package.name
                    ),
                    path: path.clone(),
                });
            }
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                project_dir: dir,
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $BASALT_BUILD_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/basalt-build/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("basalt-build/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.basalt-build/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".basalt-build/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Load the project configuration from `dir`, if present.
    fn load_project(dir: &Path) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::project_config_path(dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_toml(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a TOML config file.
    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path of the project config inside `dir`.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(PROJECT_FILE)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// The project configuration, or an error if none was found.
    pub fn require_project(&self) -> Result<&ProjectConfig, ConfigError> {
        self.project
            .as_ref()
            .ok_or_else(|| ConfigError::ProjectNotFound(self.project_dir.clone()))
    }

    /// Directory relative paths are resolved against.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn build_settings(&self) -> Option<&BuildSettings> {
        self.project.as_ref().map(|p| &p.build)
    }

    /// CMake executable.
    ///
    /// Defaults to `cmake` (looked up on `PATH`) if not configured.
    pub fn cmake(&self) -> PathBuf {
        self.build_settings()
            .and_then(|b| b.cmake.clone())
            .or_else(|| self.global.cmake.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CMAKE))
    }

    /// Python interpreter, if configured.
    pub fn python(&self) -> Option<PathBuf> {
        self.build_settings()
            .and_then(|b| b.python.clone())
            .or_else(|| self.global.python.clone())
    }

    /// Prefix of the project's CMake options.
    ///
    /// Defaults to "Basalt" if not configured.
    pub fn option_prefix(&self) -> &str {
        self.build_settings()
            .and_then(|b| b.option_prefix.as_deref())
            .unwrap_or(DEFAULT_OPTION_PREFIX)
    }

    /// Absolute scratch build directory.
    pub fn build_temp(&self) -> PathBuf {
        let rel = self
            .build_settings()
            .and_then(|b| b.build_temp.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_TEMP));
        self.project_dir.join(rel)
    }

    /// Absolute root under which extension outputs are placed.
    pub fn extension_root(&self) -> PathBuf {
        let rel = self
            .build_settings()
            .and_then(|b| b.extension_root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTENSION_ROOT));
        self.project_dir.join(rel)
    }

    /// Build descriptors for every declared extension, in declaration order.
    ///
    /// A project with no `[[extension]]` entries builds one extension named
    /// after the package, rooted at the project directory.
    pub fn extensions(&self) -> Result<Vec<Extension>, ConfigError> {
        let project = self.require_project()?;

        if project.extensions.is_empty() {
            return Ok(vec![Extension::with_base(
                project.package.name.clone(),
                ".",
                &self.project_dir,
            )]);
        }

        Ok(project
            .extensions
            .iter()
            .map(|e| {
                let source = e.source_dir.clone().unwrap_or_else(|| PathBuf::from("."));
                let ext = Extension::with_base(e.name.clone(), source, &self.project_dir);
                match &e.target {
                    Some(target) => ext.with_target(target.clone()),
                    None => ext,
                }
            })
            .collect())
    }

    /// CMake executable, with relative paths anchored to the project directory.
    pub fn cmake_program(&self) -> PathBuf {
        crate::core::paths::resolve_program(self.cmake(), &self.project_dir)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
