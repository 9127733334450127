//! engine::args
//!
//! Composition of CMake configure and build argument lists.
//!
//! Every function here is pure: given the same inputs and the same
//! [`HostPlatform`], it returns the same arguments. Platform branching
//! happens only in this module.
//!
//! # Example
//!
//! ```
//! use basalt_build::core::platform::Platform;
//! use basalt_build::engine::args::{build_args, BackendConfig};
//!
//! let args = build_args(BackendConfig::from_debug(false), "_basalt", Platform::Posix);
//! assert_eq!(args, ["--config", "ON", "--target", "_basalt", "--", "-j2"]);
//! ```

use std::fmt;
use std::path::Path;

use crate::core::platform::{HostPlatform, Platform};

/// Parallelism hint for MSBuild.
pub const MSBUILD_PARALLEL: &str = "/m";

/// Parallelism hint for make-style drivers.
pub const MAKE_PARALLEL: &str = "-j2";

/// Backend configuration selected for a build.
///
/// The configuration name doubles as the value of the project's
/// `<Prefix>_CXX_OPTIMIZE` option. A caller-level debug flag selects
/// `Unoptimized`; without it the build is `Optimized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendConfig {
    /// `ON`
    Optimized,
    /// `OFF`
    Unoptimized,
}

impl BackendConfig {
    /// Map a debug flag to a backend configuration.
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            BackendConfig::Unoptimized
        } else {
            BackendConfig::Optimized
        }
    }

    /// Configuration name passed to CMake.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendConfig::Optimized => "ON",
            BackendConfig::Unoptimized => "OFF",
        }
    }
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to the configure step for one extension.
#[derive(Debug, Clone, Copy)]
pub struct ConfigureOptions<'a> {
    /// Where the built library must land.
    pub output_dir: &'a Path,
    /// Interpreter the bindings are built against.
    pub python: &'a Path,
    /// Prefix of project-specific CMake options.
    pub option_prefix: &'a str,
    /// Selected backend configuration.
    pub backend: BackendConfig,
}

/// `-D` definitions for the configure step.
pub fn configure_args(opts: &ConfigureOptions<'_>, host: HostPlatform) -> Vec<String> {
    let output_dir = opts.output_dir.display();
    let mut args = vec![
        format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}", output_dir),
        format!("-DPYTHON_EXECUTABLE={}", opts.python.display()),
        format!("-D{}_USE_pybind11:BOOL=True", opts.option_prefix),
        "-DCMAKE_BUILD_TYPE=".to_string(),
    ];

    match host.platform {
        Platform::Windows => {
            args.push(format!(
                "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_{}={}",
                opts.backend.as_str().to_uppercase(),
                output_dir
            ));
            if host.is_64bit {
                args.push("-A".to_string());
                args.push("x64".to_string());
            }
        }
        Platform::Posix => {
            args.push(format!(
                "-D{}_CXX_OPTIMIZE:BOOL={}",
                opts.option_prefix, opts.backend
            ));
        }
    }

    args
}

/// Arguments following `cmake --build .`.
pub fn build_args(backend: BackendConfig, target: &str, platform: Platform) -> Vec<String> {
    vec![
        "--config".to_string(),
        backend.as_str().to_string(),
        "--target".to_string(),
        target.to_string(),
        "--".to_string(),
        parallelism_flag(platform).to_string(),
    ]
}

/// Job-parallelism hint handed to the native build driver.
pub fn parallelism_flag(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => MSBUILD_PARALLEL,
        Platform::Posix => MAKE_PARALLEL,
    }
}

/// Full argument list of the configure invocation.
pub fn configure_invocation_args(source_root: &Path, configure: Vec<String>) -> Vec<String> {
    let mut args = vec![source_root.display().to_string()];
    args.extend(configure);
    args
}

/// Full argument list of the build invocation.
pub fn build_invocation_args(build: Vec<String>) -> Vec<String> {
    let mut args = vec!["--build".to_string(), ".".to_string()];
    args.extend(build);
    args
}
