//! core::platform
//!
//! Host platform classification.
//!
//! The platform is resolved once when a build starts and passed explicitly
//! to every step that emits platform-specific arguments.

use std::fmt;

use serde::Serialize;

/// Platform family that decides which CMake flags are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows, driven through MSBuild generators.
    Windows,
    /// Everything else, driven through Makefile-style generators.
    Posix,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Check if this is the Windows family.
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Posix => write!(f, "posix"),
        }
    }
}

/// Resolved host description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostPlatform {
    /// Platform family.
    pub platform: Platform,
    /// Whether the host has a 64-bit address space.
    pub is_64bit: bool,
}

impl HostPlatform {
    /// Detect the current host.
    pub fn detect() -> Self {
        Self {
            platform: Platform::current(),
            is_64bit: cfg!(target_pointer_width = "64"),
        }
    }

    /// A Windows host.
    pub fn windows(is_64bit: bool) -> Self {
        Self {
            platform: Platform::Windows,
            is_64bit,
        }
    }

    /// A POSIX-like host.
    pub fn posix() -> Self {
        Self {
            platform: Platform::Posix,
            is_64bit: true,
        }
    }
}
