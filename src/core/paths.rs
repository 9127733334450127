//! core::paths
//!
//! Centralized path routing for build locations.
//!
//! # Layout
//!
//! - `<build_temp>/` - Scratch directory CMake configures and builds in
//! - `<extension_root>/<name>/` - Final location of each extension's library
//!
//! **Hard rule:** No code outside this module computes an extension's
//! output directory. All paths go through `BuildPaths`.
//!
//! # Example
//!
//! ```
//! use basalt_build::core::paths::BuildPaths;
//! use std::path::PathBuf;
//!
//! let paths = BuildPaths::new(
//!     PathBuf::from("/repo/build/temp"),
//!     PathBuf::from("/repo/build/lib"),
//! );
//!
//! assert_eq!(
//!     paths.extension_dir("basalt"),
//!     PathBuf::from("/repo/build/lib/basalt")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::config::Config;

/// Build locations for one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Scratch directory holding intermediate CMake artifacts.
    pub build_temp: PathBuf,

    /// Install location extensions are placed under.
    pub extension_root: PathBuf,
}

impl BuildPaths {
    /// Create paths from explicit locations.
    pub fn new(build_temp: PathBuf, extension_root: PathBuf) -> Self {
        Self {
            build_temp,
            extension_root,
        }
    }

    /// Create paths from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.build_temp(), config.extension_root())
    }

    /// The scratch build directory.
    pub fn build_temp(&self) -> &Path {
        &self.build_temp
    }

    /// Output directory for the extension called `name`.
    pub fn extension_dir(&self, name: &str) -> PathBuf {
        self.extension_root.join(name)
    }
}

/// Anchor a user-supplied program path to `base`.
///
/// Bare names are left for `PATH` lookup. Relative paths with a directory
/// part would otherwise resolve against the child's working directory.
pub fn resolve_program(program: PathBuf, base: &Path) -> PathBuf {
    if program.is_absolute() || program.components().count() < 2 {
        program
    } else {
        base.join(program)
    }
}
