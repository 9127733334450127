//! cli
//!
//! Command-line interface layer for basalt-build.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that load configuration and call into [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use crate::logging::init_logging;
use crate::ui::output::Verbosity;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        cmake: cli.cmake.clone(),
        python: cli.python.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
