//! check-versions command - Verify module and package version shape

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use serde_json::Value;

use super::{load_config, verbosity};
use crate::core::version::VersionPair;
use crate::engine::Context;
use crate::ui::output;

/// JSON key of the native module version.
pub const MODULE_KEY: &str = "module_version";

/// JSON key of the package version.
pub const PACKAGE_KEY: &str = "package_version";

/// Check both versions, failing on the first malformed one.
pub fn check_versions(
    ctx: &Context,
    module: Option<String>,
    package: Option<String>,
    metadata: Option<PathBuf>,
) -> Result<()> {
    let pair = match metadata {
        Some(path) => read_metadata(&path)?,
        None => {
            let module = module.ok_or_else(|| anyhow!("--module or --metadata is required"))?;
            let package = match package {
                Some(p) => p,
                None => load_config(ctx)?
                    .require_project()
                    .context("--package not given")?
                    .package
                    .version
                    .clone(),
            };
            VersionPair { module, package }
        }
    };

    pair.check()?;

    output::print(
        format!("module {} / package {}: ok", pair.module, pair.package),
        verbosity(ctx),
    );
    Ok(())
}

/// Read both version attributes from a JSON document.
fn read_metadata(path: &Path) -> Result<VersionPair> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let mut doc: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;

    let mut take = |key: &str| {
        doc.get_mut(key)
            .map(Value::take)
            .ok_or_else(|| anyhow!("'{}' is missing '{}'", path.display(), key))
    };
    let module = take(MODULE_KEY)?;
    let package = take(PACKAGE_KEY)?;
    Ok(VersionPair::from_values(&module, &package)?)
}
