//! core::version
//!
//! Version string checks and tool version parsing.
//!
//! # Version triples
//!
//! The native module and the wrapping package each report a version
//! string. Both must contain exactly two `.` separators. Nothing else is
//! checked: components need not be numeric and the two versions are not
//! compared with each other.
//!
//! # Tool versions
//!
//! `cmake --version` prints something like `cmake version 3.22.1`. The
//! first dotted number following `version` is extracted and parsed as a
//! semantic version, padding missing components with zero.
//!
//! # Example
//!
//! ```
//! use basalt_build::core::version::{check_version_triple, parse_tool_version};
//!
//! assert!(check_version_triple("package", "0.1.0").is_ok());
//! assert!(check_version_triple("package", "0.1").is_err());
//!
//! let v = parse_tool_version("cmake version 3.1\n").unwrap();
//! assert_eq!(v, semver::Version::new(3, 1, 0));
//! ```

use std::sync::OnceLock;

use regex::Regex;
use semver::Version;
use serde_json::Value;
use thiserror::Error;

/// Separator between version components.
pub const SEPARATOR: char = '.';

/// Number of separators in a well-formed version string.
pub const EXPECTED_SEPARATORS: usize = 2;

/// Errors from version string checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionFormatError {
    /// The value is not a string at all.
    #[error("{component} version is not a string: {value}")]
    NotAString { component: String, value: String },

    /// The string does not split into three components.
    #[error(
        "{component} version '{value}' has {separators} separator(s), expected {}",
        EXPECTED_SEPARATORS
    )]
    WrongComponentCount {
        component: String,
        value: String,
        separators: usize,
    },
}

/// Check that `value` has the `MAJOR.MINOR.PATCH` shape.
///
/// `component` names the source of the version in error messages.
pub fn check_version_triple(component: &str, value: &str) -> Result<(), VersionFormatError> {
    let separators = value.matches(SEPARATOR).count();
    if separators != EXPECTED_SEPARATORS {
        return Err(VersionFormatError::WrongComponentCount {
            component: component.to_string(),
            value: value.to_string(),
            separators,
        });
    }
    Ok(())
}

/// Check a version attribute read from a JSON document.
///
/// Non-string values fail before the separator check.
pub fn check_version_value<'a>(
    component: &str,
    value: &'a Value,
) -> Result<&'a str, VersionFormatError> {
    let s = value.as_str().ok_or_else(|| VersionFormatError::NotAString {
        component: component.to_string(),
        value: value.to_string(),
    })?;
    check_version_triple(component, s)?;
    Ok(s)
}

/// A pair of version attributes exposed by a built package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPair {
    /// Version reported by the compiled native module.
    pub module: String,
    /// Version reported by the package metadata.
    pub package: String,
}

impl VersionPair {
    /// Build a pair from attributes read out of a JSON document.
    ///
    /// Each value is fully checked, module first.
    pub fn from_values(module: &Value, package: &Value) -> Result<Self, VersionFormatError> {
        Ok(Self {
            module: check_version_value("module", module)?.to_string(),
            package: check_version_value("package", package)?.to_string(),
        })
    }

    /// Check both versions, module first.
    pub fn check(&self) -> Result<(), VersionFormatError> {
        check_version_triple("module", &self.module)?;
        check_version_triple("package", &self.package)
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"version\s*([\d.]+)").expect("valid version regex"))
}

/// Extract and parse the tool version from `--version` output.
///
/// Returns `None` if no `version <number>` pattern is present or the
/// number cannot be read as a version.
pub fn parse_tool_version(output: &str) -> Option<Version> {
    let captured = version_pattern().captures(output)?.get(1)?.as_str();
    let trimmed = captured.trim_matches(SEPARATOR);

    let mut parts = trimmed.split(SEPARATOR);
    let mut next = || -> Option<u64> {
        match parts.next() {
            Some(p) => p.parse().ok(),
            None => Some(0),
        }
    };
    let major = next()?;
    let minor = next()?;
    let patch = next()?;
    Some(Version::new(major, minor, patch))
}
