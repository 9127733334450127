//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the project directory
//! 2. Applies CLI overrides
//! 3. Calls the engine and formats the result
//!
//! Handlers never spawn CMake directly.

mod build;
mod check_versions;
mod completion;
mod metadata;
mod tool;

pub use build::{build, build_options, plan};
pub use check_versions::check_versions;
pub use completion::completion;
pub use metadata::{metadata, PackageMetadata};
pub use tool::tool;

use std::path::{Path, PathBuf};

use crate::cli::args::Command;
use crate::core::config::{Config, ConfigLoadResult};
use crate::core::paths::resolve_program;
use crate::engine::{Cmake, Context};
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Build(args) => build(ctx, args.backend_config()),
        Command::Plan(args) => plan(ctx, args.backend_config()),
        Command::Tool => tool(ctx),
        Command::CheckVersions {
            module,
            package,
            metadata,
        } => check_versions(ctx, module, package, metadata),
        Command::Metadata => metadata(ctx),
        Command::Completion { shell } => completion(shell),
    }
}

/// Output verbosity for a context.
pub(crate) fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.verbose)
}

/// Absolute project directory for a context.
pub(crate) fn project_dir(ctx: &Context) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(match &ctx.cwd {
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

/// Load configuration and surface warnings.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let dir = project_dir(ctx)?;
    let ConfigLoadResult { config, warnings } =
        Config::load(Some(&dir)).context("Failed to load configuration")?;

    let verbosity = verbosity(ctx);
    for warning in &warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    Ok(config)
}

/// Anchor a path given on the command line to the process working directory.
pub(crate) fn resolve_flag_program(program: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(resolve_program(program.to_path_buf(), &cwd))
}

/// The CMake tool selected by flags or configuration.
pub(crate) fn cmake_tool(ctx: &Context, config: &Config) -> Result<Cmake> {
    let program = match &ctx.cmake {
        Some(flag) => resolve_flag_program(flag)?,
        None => config.cmake_program(),
    };
    Ok(Cmake::new(program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BuildTool;

    #[test]
    fn relative_cwd_flag_is_made_absolute() {
        let ctx = Context {
            cwd: Some(PathBuf::from("proj")),
            ..Context::default()
        };
        let dir = project_dir(&ctx).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("proj"));
    }

    #[test]
    fn relative_cmake_flag_is_made_absolute() {
        let ctx = Context {
            cmake: Some(PathBuf::from("./bin/cmake")),
            ..Context::default()
        };
        let cmake = cmake_tool(&ctx, &Config::default()).unwrap();
        assert!(cmake.program().is_absolute());
        assert!(cmake.program().ends_with("bin/cmake"));
    }

    #[test]
    fn bare_cmake_flag_left_for_path_lookup() {
        let ctx = Context {
            cmake: Some(PathBuf::from("cmake3")),
            ..Context::default()
        };
        let cmake = cmake_tool(&ctx, &Config::default()).unwrap();
        assert_eq!(cmake.program(), Path::new("cmake3"));
    }
}
