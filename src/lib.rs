//! basalt-build - Build orchestrator for the basalt native extension
//!
//! basalt-build compiles the natively-implemented storage engine extension
//! by driving CMake as a child process, and places the resulting library
//! into the package tree. It also checks that the version strings exposed
//! by the native module and the package are well-formed.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Tool check, version gate, argument composition, CMake runs
//! - [`core`] - Descriptors, platform, version checks, config, paths
//! - [`ui`] - User-facing output
//! - [`logging`] - Diagnostic logging bootstrap
//!
//! # Correctness Invariants
//!
//! 1. No extension is configured before the tool check passes
//! 2. Extensions are built sequentially and the first failure stops the run
//! 3. The child environment is derived explicitly; the process environment is never mutated
//! 4. Platform decisions are made once per run

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod ui;
