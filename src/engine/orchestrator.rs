//! engine::orchestrator
//!
//! Drives CMake over a list of extensions.
//!
//! # Lifecycle
//!
//! ```text
//! Check tool -> [Gate version (Windows)] -> for each extension: Plan -> Configure -> Build
//! ```
//!
//! # Invariants
//!
//! - Nothing is configured or built until the tool check passes
//! - Extensions are built in order, one at a time
//! - The first failure aborts the run; later extensions are not attempted
//! - The scratch directory is created if absent and never removed

use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;

use super::args::{
    build_args, build_invocation_args, configure_args, configure_invocation_args, BackendConfig,
    ConfigureOptions,
};
use super::env::BuildEnv;
use super::gate::check_tool;
use super::tool::{BuildTool, Invocation, Step};
use super::BuildError;
use crate::core::paths::BuildPaths;
use crate::core::platform::HostPlatform;
use crate::core::types::Extension;

/// Settings shared by every extension in a run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Resolved host, fixed for the whole run.
    pub host: HostPlatform,
    /// Scratch and output locations.
    pub paths: BuildPaths,
    /// Interpreter passed to CMake.
    pub python: PathBuf,
    /// Prefix of project-specific CMake options.
    pub option_prefix: String,
    /// Selected backend configuration.
    pub backend: BackendConfig,
    /// Distribution version embedded into the library.
    pub version: String,
    /// Ambient environment snapshot.
    pub ambient: BuildEnv,
}

/// Composed invocations for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPlan {
    /// Extension name.
    pub name: String,
    /// Where the library lands.
    pub output_dir: PathBuf,
    /// `cmake <source> ...`
    pub configure: Invocation,
    /// `cmake --build . ...`
    pub build: Invocation,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Version reported by the tool, if parseable.
    pub tool_version: Option<Version>,
    /// Extensions built, in order.
    pub built: Vec<ExtensionPlan>,
}

/// Sequential, fail-fast build driver.
pub struct Orchestrator<'a, T: BuildTool + ?Sized> {
    tool: &'a T,
    options: BuildOptions,
}

impl<'a, T: BuildTool + ?Sized> Orchestrator<'a, T> {
    /// Create an orchestrator driving `tool`.
    pub fn new(tool: &'a T, options: BuildOptions) -> Self {
        Self { tool, options }
    }

    /// The options this orchestrator was created with.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Compose the invocations for one extension without running anything.
    pub fn plan(&self, ext: &Extension) -> ExtensionPlan {
        let opts = &self.options;
        let output_dir = opts.paths.extension_dir(ext.name());

        let configure = configure_args(
            &ConfigureOptions {
                output_dir: &output_dir,
                python: &opts.python,
                option_prefix: &opts.option_prefix,
                backend: opts.backend,
            },
            opts.host,
        );
        let build = build_args(opts.backend, ext.target(), opts.host.platform);
        let env = opts.ambient.with_version_info(&opts.version);
        let cwd = opts.paths.build_temp().to_path_buf();

        ExtensionPlan {
            name: ext.name().to_string(),
            output_dir,
            configure: Invocation {
                step: Step::Configure,
                args: configure_invocation_args(ext.source_root(), configure),
                cwd: cwd.clone(),
                env: env.clone(),
            },
            build: Invocation {
                step: Step::Build,
                args: build_invocation_args(build),
                cwd,
                env,
            },
        }
    }

    /// Compose invocations for every extension, in order.
    pub fn plan_all(&self, extensions: &[Extension]) -> Vec<ExtensionPlan> {
        extensions.iter().map(|e| self.plan(e)).collect()
    }

    /// Check the tool, then configure and build every extension in order.
    ///
    /// # Errors
    ///
    /// Fails on the first error; see [`BuildError`]. Extensions after a
    /// failing one are not attempted.
    pub fn run(&self, extensions: &[Extension]) -> Result<BuildReport, BuildError> {
        if extensions.is_empty() {
            return Err(BuildError::NoExtensions);
        }

        let check = check_tool(self.tool, extensions, self.options.host.platform)?;
        tracing::info!(
            tool = %self.tool.program().display(),
            version = ?check.version.as_ref().map(|v| v.to_string()),
            platform = %self.options.host.platform,
            "build tool ready"
        );

        let mut built = Vec::with_capacity(extensions.len());
        for ext in extensions {
            built.push(self.build_extension(ext)?);
        }

        Ok(BuildReport {
            tool_version: check.version,
            built,
        })
    }

    /// Configure and build a single extension.
    fn build_extension(&self, ext: &Extension) -> Result<ExtensionPlan, BuildError> {
        let plan = self.plan(ext);
        ensure_dir(self.options.paths.build_temp())?;

        tracing::info!(extension = %plan.name, output = %plan.output_dir.display(), "configuring");
        self.run_step(&plan.name, &plan.configure)?;

        tracing::info!(extension = %plan.name, target = %ext.target(), "building");
        self.run_step(&plan.name, &plan.build)?;

        Ok(plan)
    }

    fn run_step(&self, extension: &str, invocation: &Invocation) -> Result<(), BuildError> {
        let status = self
            .tool
            .run(invocation)
            .map_err(|e| BuildError::ChildProcessFailure {
                extension: extension.to_string(),
                step: invocation.step,
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(BuildError::ChildProcessFailure {
                extension: extension.to_string(),
                step: invocation.step,
                reason: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Create `dir` and its parents if absent.
fn ensure_dir(dir: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(dir).map_err(|e| BuildError::ScratchDir {
        path: dir.to_path_buf(),
        source: e,
    })
}
