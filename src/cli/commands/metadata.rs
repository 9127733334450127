//! metadata command - Print package metadata as JSON

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use super::load_config;
use crate::core::config::Config;
use crate::core::types::Extension;
use crate::engine::Context;

/// Package descriptor as exposed to installers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PackageMetadata {
    /// Distribution name.
    pub name: String,
    /// Distribution version.
    pub version: String,
    /// One-line description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Console scripts, name to `module:function`.
    pub entry_points: BTreeMap<String, String>,
    /// Native extensions in build order.
    pub extensions: Vec<Extension>,
}

impl PackageMetadata {
    /// Collect metadata from a loaded project.
    pub fn from_config(config: &Config) -> Result<Self> {
        let project = config.require_project()?;
        Ok(Self {
            name: project.package.name.clone(),
            version: project.package.version.clone(),
            description: project.package.description.clone(),
            entry_points: project.package.entry_points.clone(),
            extensions: config.extensions()?,
        })
    }
}

/// Print the package metadata.
pub fn metadata(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let meta = PackageMetadata::from_config(&config)?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}
