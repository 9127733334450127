//! engine
//!
//! Orchestrates native extension builds: Check -> Gate -> Configure -> Build.
//!
//! # Architecture
//!
//! The engine is the only layer that talks to CMake:
//!
//! 1. **Check**: Query the tool's version; a missing tool blocks every extension
//! 2. **Gate**: On Windows, require a minimum tool version
//! 3. **Configure**: `cmake <source> -D...` in the scratch directory
//! 4. **Build**: `cmake --build . --config <C> --target <T> -- <jobs>`
//!
//! # Invariants
//!
//! - All child processes go through a [`BuildTool`]
//! - The host platform is resolved once and passed explicitly
//! - The child environment is an explicit [`BuildEnv`] value
//! - Every failure is fatal; there is no retry and no rollback
//!
//! # Example
//!
//! ```no_run
//! use basalt_build::core::paths::BuildPaths;
//! use basalt_build::core::platform::HostPlatform;
//! use basalt_build::core::types::Extension;
//! use basalt_build::engine::{BackendConfig, BuildEnv, BuildOptions, Cmake, Orchestrator};
//! use std::path::PathBuf;
//!
//! let cmake = Cmake::default();
//! let options = BuildOptions {
//!     host: HostPlatform::detect(),
//!     paths: BuildPaths::new("build/temp".into(), "build/lib".into()),
//!     python: PathBuf::from("python3"),
//!     option_prefix: "Basalt".into(),
//!     backend: BackendConfig::from_debug(false),
//!     version: "0.1.0".into(),
//!     ambient: BuildEnv::capture(),
//! };
//!
//! let report = Orchestrator::new(&cmake, options)
//!     .run(&[Extension::new("basalt", ".")])
//!     .unwrap();
//! println!("built {} extension(s)", report.built.len());
//! ```

pub mod args;
pub mod env;
pub mod gate;
pub mod mock;
pub mod orchestrator;
pub mod tool;

pub use args::BackendConfig;
pub use env::BuildEnv;
pub use gate::{check_tool, ToolCheck, MIN_WINDOWS_CMAKE};
pub use orchestrator::{BuildOptions, BuildReport, ExtensionPlan, Orchestrator};
pub use tool::{BuildTool, Cmake, Invocation, Step, ToolError, ToolStatus};

use std::path::PathBuf;

use semver::Version;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Project directory override.
    pub cwd: Option<PathBuf>,
    /// Verbose logging enabled.
    pub verbose: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// CMake executable override.
    pub cmake: Option<PathBuf>,
    /// Python interpreter override.
    pub python: Option<PathBuf>,
}

/// Errors from build orchestration.
///
/// Every variant is fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The build tool could not be invoked.
    #[error(
        "{} must be installed to build the following extensions: {}",
        .program.display(),
        extension_list(.extensions)
    )]
    ToolNotFound {
        program: PathBuf,
        extensions: Vec<String>,
    },

    /// The build tool is older than required.
    #[error("CMake >= {required} is required on Windows (found {found})")]
    ToolVersionTooLow { found: Version, required: Version },

    /// The build tool's version output did not contain a version.
    #[error("could not read a version from CMake output: {output:?}")]
    ToolVersionUnparseable { output: String },

    /// A configure or build invocation failed.
    #[error("{step} step for extension '{extension}' failed: {reason}")]
    ChildProcessFailure {
        extension: String,
        step: Step,
        reason: String,
    },

    /// The scratch build directory could not be created.
    #[error("failed to create build directory '{}': {source}", .path.display())]
    ScratchDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Nothing to build.
    #[error("no extensions to build")]
    NoExtensions,
}

fn extension_list(extensions: &[String]) -> String {
    if extensions.is_empty() {
        "(none declared)".to_string()
    } else {
        extensions.join(", ")
    }
}
