//! core::types
//!
//! Descriptor types for native build targets.
//!
//! # Types
//!
//! - [`Extension`] - A named CMake build target rooted at a source directory
//!
//! # Validation
//!
//! Descriptors are plain data. A missing or broken source root is not
//! detected here; it surfaces when CMake is invoked against it.
//!
//! # Examples
//!
//! ```
//! use basalt_build::core::types::Extension;
//! use std::path::Path;
//!
//! let ext = Extension::with_base("basalt", "native", Path::new("/repo"));
//! assert_eq!(ext.name(), "basalt");
//! assert_eq!(ext.source_root(), Path::new("/repo/native"));
//! assert_eq!(ext.target(), "_basalt");
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// A native extension to be built by CMake.
///
/// The source root is made absolute at construction so later steps do not
/// depend on the process working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    name: String,
    source_root: PathBuf,
    target: String,
}

impl Extension {
    /// Create a descriptor, resolving `source_dir` against the current directory.
    ///
    /// If the current directory cannot be determined the path is kept as given.
    pub fn new(name: impl Into<String>, source_dir: impl AsRef<Path>) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        Self::with_base(name, source_dir, &base)
    }

    /// Create a descriptor, resolving `source_dir` against `base`.
    pub fn with_base(name: impl Into<String>, source_dir: impl AsRef<Path>, base: &Path) -> Self {
        let name = name.into();
        let target = default_target(&name);
        Self {
            source_root: absolutize(source_dir.as_ref(), base),
            name,
            target,
        }
    }

    /// Override the CMake target built for this extension.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// The extension name, also its output subdirectory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path to the CMake project root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The CMake target to build.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Default CMake target name for an extension (`_<name>`).
pub fn default_target(name: &str) -> String {
    format!("_{}", name)
}

/// Join `path` onto `base` when relative and drop `.` / `..` components.
///
/// Purely lexical; the path does not have to exist.
fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else if base.is_absolute() {
        base.join(path)
    } else {
        std::env::current_dir().unwrap_or_default().join(base).join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
