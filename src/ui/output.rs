//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! User-facing messages are formatted consistently and respect the quiet
//! flag. Diagnostic logging is separate and goes through `tracing`.

use std::fmt::Display;
use std::path::Path;

use crate::engine::{ExtensionPlan, Invocation};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one invocation as `(cd <cwd> && <command line>)`.
pub fn format_invocation(program: &Path, invocation: &Invocation) -> String {
    format!(
        "(cd {} && {})",
        invocation.cwd.display(),
        invocation.command_line(program)
    )
}

/// Format the planned steps for one extension.
pub fn format_plan(program: &Path, plan: &ExtensionPlan) -> String {
    let steps = [
        format_invocation(program, &plan.configure),
        format_invocation(program, &plan.build),
    ];
    format!(
        "{} -> {}\n{}",
        plan.name,
        plan.output_dir.display(),
        format_list(&steps, "  ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BuildEnv, Step};
    use std::path::PathBuf;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&["a", "b"], "- "), "- a\n- b");
    }

    #[test]
    fn plan_formatting() {
        let inv = |step, args: &[&str]| Invocation {
            step,
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: PathBuf::from("/b"),
            env: BuildEnv::default(),
        };
        let plan = ExtensionPlan {
            name: "basalt".into(),
            output_dir: PathBuf::from("/lib/basalt"),
            configure: inv(Step::Configure, &["/repo"]),
            build: inv(Step::Build, &["--build", "."]),
        };

        let text = format_plan(Path::new("cmake"), &plan);
        assert_eq!(
            text,
            "basalt -> /lib/basalt\n  (cd /b && cmake /repo)\n  (cd /b && cmake --build .)"
        );
    }
}
