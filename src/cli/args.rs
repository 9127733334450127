//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Use this directory as the project directory
//! - `--verbose` / `-v`: Enable diagnostic logging
//! - `--quiet` / `-q`: Minimal output
//! - `--cmake <path>`: CMake executable to use
//! - `--python <path>`: Python interpreter passed to CMake

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::BackendConfig;

/// basalt-build - Build orchestrator for the basalt native extension
#[derive(Parser, Debug)]
#[command(name = "basalt-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this directory as the project directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable diagnostic logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// CMake executable to use
    #[arg(long, global = true, value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Python interpreter passed to CMake
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure and build every native extension
    #[command(
        name = "build",
        long_about = "Configure and build every native extension.\n\n\
            Checks that CMake is installed (and, on Windows, at least 3.1.0), then \
            runs `cmake <source>` followed by `cmake --build .` for each extension \
            declared in basalt-build.toml, in order. The first failure stops the run.",
        after_help = "\
EXAMPLES:
    # Optimized build of all extensions
    basalt-build build

    # Unoptimized backend configuration
    basalt-build build --debug

    # Use a specific CMake
    basalt-build --cmake /opt/cmake/bin/cmake build"
    )]
    Build(BackendArgs),

    /// Show the CMake invocations a build would run
    #[command(name = "plan")]
    Plan(BackendArgs),

    /// Show the detected CMake version and whether it passes the gate
    #[command(name = "tool")]
    Tool,

    /// Check that module and package versions are MAJOR.MINOR.PATCH
    #[command(
        name = "check-versions",
        long_about = "Check that the native module version and the package version \
            each contain exactly two '.' separators.\n\n\
            Versions can be given directly or read from a JSON document with \
            `module_version` and `package_version` keys. The package version \
            defaults to the one in basalt-build.toml."
    )]
    CheckVersions {
        /// Version reported by the native module
        #[arg(long, conflicts_with = "metadata")]
        module: Option<String>,

        /// Version reported by the package
        #[arg(long, conflicts_with = "metadata")]
        package: Option<String>,

        /// JSON file holding both versions
        #[arg(long, value_name = "FILE")]
        metadata: Option<PathBuf>,
    },

    /// Print package metadata as JSON
    #[command(name = "metadata")]
    Metadata,

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Backend configuration selection.
#[derive(Args, Debug, Clone, Copy)]
pub struct BackendArgs {
    /// Build the unoptimized backend configuration (`OFF`)
    #[arg(long, conflicts_with = "backend")]
    pub debug: bool,

    /// Backend configuration to build
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

impl BackendArgs {
    /// Resolve the backend configuration.
    ///
    /// `--backend` wins; otherwise `--debug` selects `Unoptimized`.
    pub fn backend_config(&self) -> BackendConfig {
        match self.backend {
            Some(Backend::Optimized) => BackendConfig::Optimized,
            Some(Backend::Unoptimized) => BackendConfig::Unoptimized,
            None => BackendConfig::from_debug(self.debug),
        }
    }
}

/// Named backend configurations.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Optimized,
    Unoptimized,
}

/// Supported shells for completion
#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults_to_optimized() {
        let cli = Cli::try_parse_from(["basalt-build", "build"]).unwrap();
        match cli.command {
            Command::Build(args) => assert_eq!(args.backend_config(), BackendConfig::Optimized),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debug_selects_unoptimized() {
        let cli = Cli::try_parse_from(["basalt-build", "plan", "--debug"]).unwrap();
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.backend_config(), BackendConfig::Unoptimized)
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debug_conflicts_with_backend() {
        let result =
            Cli::try_parse_from(["basalt-build", "build", "--debug", "--backend", "optimized"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["basalt-build", "tool", "--cmake", "/opt/cmake", "-q"])
            .unwrap();
        assert_eq!(cli.cmake, Some(PathBuf::from("/opt/cmake")));
        assert!(cli.quiet);
    }

    #[test]
    fn metadata_conflicts_with_inline_versions() {
        let result = Cli::try_parse_from([
            "basalt-build",
            "check-versions",
            "--module",
            "6.2.4",
            "--metadata",
            "v.json",
        ]);
        assert!(result.is_err());
    }
}
