//! engine::gate
//!
//! Tool-availability check and the Windows version gate.
//!
//! # Checks
//!
//! 1. The tool must answer `--version`. If it cannot, no extension can be
//!    built, so the error lists all of them.
//! 2. On Windows only, the reported version must be at least
//!    [`MIN_WINDOWS_CMAKE`]. Output that does not contain a version is an
//!    error there. Other platforms have no version floor.

use semver::Version;

use super::tool::BuildTool;
use super::BuildError;
use crate::core::platform::Platform;
use crate::core::types::Extension;
use crate::core::version::parse_tool_version;

/// Minimum CMake required for Windows builds.
pub const MIN_WINDOWS_CMAKE: Version = Version::new(3, 1, 0);

/// Result of a passed gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    /// Raw `--version` output.
    pub output: String,
    /// Parsed version, if the output contained one.
    pub version: Option<Version>,
}

/// Run both checks against `tool` for the given extensions.
pub fn check_tool<T: BuildTool + ?Sized>(
    tool: &T,
    extensions: &[Extension],
    platform: Platform,
) -> Result<ToolCheck, BuildError> {
    let output = tool.version_output().map_err(|e| {
        tracing::debug!(error = %e, "build tool query failed");
        BuildError::ToolNotFound {
            program: tool.program().to_path_buf(),
            extensions: extensions.iter().map(|e| e.name().to_string()).collect(),
        }
    })?;

    let version = parse_tool_version(&output);

    if platform.is_windows() {
        let found = version
            .clone()
            .ok_or_else(|| BuildError::ToolVersionUnparseable {
                output: output.trim().to_string(),
            })?;
        check_minimum(&found, &MIN_WINDOWS_CMAKE)?;
    }

    Ok(ToolCheck { output, version })
}

/// Fail if `found` is below `required`.
pub fn check_minimum(found: &Version, required: &Version) -> Result<(), BuildError> {
    if found < required {
        return Err(BuildError::ToolVersionTooLow {
            found: found.clone(),
            required: required.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockTool;
    use std::path::Path;

    fn exts(names: &[&str]) -> Vec<Extension> {
        names
            .iter()
            .map(|n| Extension::with_base(*n, ".", Path::new("/repo")))
            .collect()
    }

    #[test]
    fn missing_tool_names_every_extension() {
        let tool = MockTool::missing();
        let err = check_tool(&tool, &exts(&["basalt", "ngv", "extra"]), Platform::Posix)
            .unwrap_err();

        match &err {
            BuildError::ToolNotFound { extensions, .. } => {
                assert_eq!(extensions, &["basalt", "ngv", "extra"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("basalt, ngv, extra"));
    }

    #[test]
    fn windows_rejects_old_cmake() {
        let tool = MockTool::with_version("3.0.9");
        let err = check_tool(&tool, &exts(&["basalt"]), Platform::Windows).unwrap_err();

        assert!(matches!(err, BuildError::ToolVersionTooLow { .. }));
        assert!(err.to_string().contains("3.1.0"));
    }

    #[test]
    fn windows_accepts_minimum() {
        let tool = MockTool::with_version("3.1.0");
        let check = check_tool(&tool, &exts(&["basalt"]), Platform::Windows).unwrap();
        assert_eq!(check.version, Some(Version::new(3, 1, 0)));
    }

    #[test]
    fn windows_rejects_unparseable_output() {
        let tool = MockTool::with_output("cmake, probably\n");
        let err = check_tool(&tool, &exts(&["basalt"]), Platform::Windows).unwrap_err();
        assert!(matches!(err, BuildError::ToolVersionUnparseable { .. }));
    }

    #[test]
    fn posix_never_gates() {
        for output in ["cmake version 2.8.12", "cmake version 3.0.9", "garbage"] {
            let tool = MockTool::with_output(output);
            assert!(check_tool(&tool, &exts(&["basalt"]), Platform::Posix).is_ok());
        }
    }

    #[test]
    fn minimum_comparison() {
        assert!(check_minimum(&Version::new(3, 2, 0), &MIN_WINDOWS_CMAKE).is_ok());
        assert!(check_minimum(&Version::new(2, 99, 99), &MIN_WINDOWS_CMAKE).is_err());
    }
}
