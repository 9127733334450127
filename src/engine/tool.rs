//! engine::tool
//!
//! Build tool abstraction and the CMake implementation.
//!
//! # Design
//!
//! The orchestrator never spawns processes directly. It hands fully
//! composed [`Invocation`]s to a [`BuildTool`], which runs them to
//! completion and reports the exit status. Tests substitute
//! [`MockTool`](super::mock::MockTool).
//!
//! All calls block. There is no timeout: a hung child hangs the build.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use super::env::BuildEnv;

/// Errors from running a build tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: PathBuf,
        source: io::Error,
    },

    /// `--version` ran but did not succeed.
    #[error("'{program} --version' exited with {status}")]
    VersionQuery { program: PathBuf, status: ToolStatus },
}

/// Which CMake mode an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `cmake <source> -D...`
    Configure,
    /// `cmake --build . ...`
    Build,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Configure => write!(f, "configure"),
            Step::Build => write!(f, "build"),
        }
    }
}

/// Exit status of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, `None` if terminated by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    /// A successful exit.
    pub const SUCCESS: ToolStatus = ToolStatus { code: Some(0) };

    /// Exit with the given code.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Check if the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "signal"),
        }
    }
}

/// A fully composed tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Which mode this runs.
    pub step: Step,
    /// Arguments after the program name.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Complete child environment.
    pub env: BuildEnv,
}

impl Invocation {
    /// Render as a shell-like command line for display.
    pub fn command_line(&self, program: &Path) -> String {
        std::iter::once(program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A build-generation tool driven as a child process.
pub trait BuildTool {
    /// Program name or path, used in messages.
    fn program(&self) -> &Path;

    /// Query the tool's version output.
    ///
    /// Fails if the tool cannot be located or invoked.
    fn version_output(&self) -> Result<String, ToolError>;

    /// Run an invocation to completion.
    fn run(&self, invocation: &Invocation) -> Result<ToolStatus, ToolError>;
}

/// CMake found on `PATH` or at an explicit location.
#[derive(Debug, Clone)]
pub struct Cmake {
    program: PathBuf,
}

impl Cmake {
    /// Use the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Cmake {
    fn default() -> Self {
        Self::new("cmake")
    }
}

impl BuildTool for Cmake {
    fn program(&self) -> &Path {
        &self.program
    }

    fn version_output(&self) -> Result<String, ToolError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ToolError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ToolError::VersionQuery {
                program: self.program.clone(),
                status: output.status.into(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, invocation: &Invocation) -> Result<ToolStatus, ToolError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null());
        invocation.env.apply(&mut cmd);

        tracing::debug!(
            step = %invocation.step,
            cwd = %invocation.cwd.display(),
            "{}",
            invocation.command_line(&self.program)
        );

        let status = cmd.status().map_err(|e| ToolError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        Ok(status.into())
    }
}

/// Interpreter names searched on `PATH`, in order.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Resolve the Python interpreter handed to CMake.
///
/// An explicit path wins; otherwise the first candidate found on `PATH`.
pub fn find_python(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        PYTHON_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
    })
}
