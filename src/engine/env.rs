//! engine::env
//!
//! Child-process environment for CMake invocations.
//!
//! The environment is an explicit value: a snapshot of the ambient
//! variables, amended before being handed to the child. The process
//! environment itself is never modified.

use std::collections::BTreeMap;
use std::process::Command;

/// Compiler flags variable amended with the version definition.
pub const CXXFLAGS: &str = "CXXFLAGS";

/// Environment passed to a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    vars: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn capture() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build an environment from explicit pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Set a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Iterate over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return a copy with `CXXFLAGS` extended by a `VERSION_INFO` definition.
    ///
    /// The existing value (empty if unset) is kept as a prefix.
    pub fn with_version_info(&self, version: &str) -> Self {
        let mut env = self.clone();
        let existing = self.get(CXXFLAGS).unwrap_or("");
        env.set(CXXFLAGS, version_info_flags(existing, version));
        env
    }

    /// Replace the environment of `cmd` with this one.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env_clear();
        cmd.envs(self.vars.iter());
    }
}

/// `existing` followed by a quoted `-DVERSION_INFO` definition.
pub fn version_info_flags(existing: &str, version: &str) -> String {
    format!("{} -DVERSION_INFO=\\\"{}\\\"", existing, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amendment_keeps_existing_prefix() {
        let env = BuildEnv::from_vars([("CXXFLAGS", "-O2")]);
        let amended = env.with_version_info("0.1.0");

        let flags = amended.get(CXXFLAGS).unwrap();
        assert!(flags.starts_with("-O2"));
        assert!(flags.contains("0.1.0"));
        assert_eq!(flags, r#"-O2 -DVERSION_INFO=\"0.1.0\""#);
    }

    #[test]
    fn amendment_without_existing_value() {
        let env = BuildEnv::default();
        let amended = env.with_version_info("0.1.0");
        assert_eq!(
            amended.get(CXXFLAGS),
            Some(r#" -DVERSION_INFO=\"0.1.0\""#)
        );
    }

    #[test]
    fn amendment_does_not_touch_source() {
        let env = BuildEnv::from_vars([("CXXFLAGS", "-O2"), ("PATH", "/usr/bin")]);
        let amended = env.with_version_info("1.2.3");

        assert_eq!(env.get(CXXFLAGS), Some("-O2"));
        assert_eq!(amended.get("PATH"), Some("/usr/bin"));
    }

    #[test]
    fn capture_sees_process_env() {
        let env = BuildEnv::capture();
        assert!(env.iter().count() > 0);
    }

    #[test]
    fn iter_is_sorted() {
        let env = BuildEnv::from_vars([("B", "2"), ("A", "1")]);
        let names: Vec<_> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
