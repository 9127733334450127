//! engine::mock
//!
//! Mock build tool for deterministic testing.
//!
//! # Design
//!
//! `MockTool` implements [`BuildTool`] without spawning anything. It
//! reports a configurable version string (or acts as if the tool is not
//! installed), records every invocation, and can be told to fail a given
//! step.
//!
//! # Example
//!
//! ```
//! use basalt_build::engine::mock::MockTool;
//! use basalt_build::engine::tool::BuildTool;
//!
//! let tool = MockTool::with_version("3.2.0");
//! assert!(tool.version_output().unwrap().contains("3.2.0"));
//!
//! let tool = MockTool::missing();
//! assert!(tool.version_output().is_err());
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::tool::{BuildTool, Invocation, Step, ToolError, ToolStatus};

/// Mock tool for testing.
///
/// Clones share recorded state.
#[derive(Debug, Clone)]
pub struct MockTool {
    inner: Arc<Mutex<MockToolInner>>,
}

#[derive(Debug)]
struct MockToolInner {
    /// `--version` output, `None` if the tool is missing.
    version_output: Option<String>,
    /// Step to fail and the 1-based occurrence of that step to fail on.
    fail_on: Option<FailOn>,
    /// Recorded calls.
    operations: Vec<MockOperation>,
}

/// Configuration for which invocation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailOn {
    /// Step to fail.
    pub step: Step,
    /// Fail the n-th run of that step (1-based).
    pub occurrence: usize,
    /// Exit code reported.
    pub code: i32,
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    /// `--version` was queried.
    Version,
    /// An invocation was run.
    Run(Invocation),
}

impl MockTool {
    /// A tool reporting `cmake version <version>`.
    pub fn with_version(version: &str) -> Self {
        Self::with_output(format!("cmake version {}\n", version))
    }

    /// A tool reporting arbitrary `--version` output.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self::from_inner(Some(output.into()))
    }

    /// A tool that cannot be invoked.
    pub fn missing() -> Self {
        Self::from_inner(None)
    }

    fn from_inner(version_output: Option<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockToolInner {
                version_output,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Fail the `occurrence`-th run of `step` with exit code `code`.
    pub fn fail_on(self, step: Step, occurrence: usize, code: i32) -> Self {
        self.lock().fail_on = Some(FailOn {
            step,
            occurrence,
            code,
        });
        self
    }

    /// All recorded calls, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::Run(inv) => Some(inv.clone()),
                MockOperation::Version => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockToolInner> {
        // A panicking test thread must not hide recorded state from others
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BuildTool for MockTool {
    fn program(&self) -> &Path {
        Path::new("cmake")
    }

    fn version_output(&self) -> Result<String, ToolError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Version);
        inner.version_output.clone().ok_or_else(|| ToolError::Spawn {
            program: PathBuf::from("cmake"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        })
    }

    fn run(&self, invocation: &Invocation) -> Result<ToolStatus, ToolError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Run(invocation.clone()));

        if let Some(fail) = inner.fail_on {
            let seen = inner
                .operations
                .iter()
                .filter(|op| matches!(op, MockOperation::Run(i) if i.step == fail.step))
                .count();
            if fail.step == invocation.step && seen == fail.occurrence {
                return Ok(ToolStatus::exited(fail.code));
            }
        }

        Ok(ToolStatus::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::env::BuildEnv;

    fn invocation(step: Step) -> Invocation {
        Invocation {
            step,
            args: vec![],
            cwd: PathBuf::from("/tmp"),
            env: BuildEnv::default(),
        }
    }

    #[test]
    fn records_operations() {
        let tool = MockTool::with_version("3.2.0");
        tool.version_output().unwrap();
        tool.run(&invocation(Step::Configure)).unwrap();

        let ops = tool.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], MockOperation::Version);
        assert_eq!(tool.invocations().len(), 1);
    }

    #[test]
    fn fails_requested_occurrence() {
        let tool = MockTool::with_version("3.2.0").fail_on(Step::Build, 2, 1);

        assert!(tool.run(&invocation(Step::Build)).unwrap().success());
        assert!(tool.run(&invocation(Step::Configure)).unwrap().success());
        assert_eq!(
            tool.run(&invocation(Step::Build)).unwrap(),
            ToolStatus::exited(1)
        );
    }

    #[test]
    fn clones_share_state() {
        let tool = MockTool::missing();
        let clone = tool.clone();
        assert!(clone.version_output().is_err());
        assert_eq!(tool.operations().len(), 1);
    }
}
