//! tool command - Show the detected CMake and whether it passes the gate

use std::path::Path;

use anyhow::Result;

use super::{cmake_tool, load_config};
use crate::core::config::ConfigError;
use crate::core::platform::HostPlatform;
use crate::engine::{check_tool, BuildTool, Context};

/// Report the CMake version, platform gate result and config sources.
pub fn tool(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let cmake = cmake_tool(ctx, &config)?;
    let host = HostPlatform::detect();

    // Outside a project there is nothing to name
    let extensions = match config.extensions() {
        Ok(extensions) => extensions,
        Err(ConfigError::ProjectNotFound(_)) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let check = check_tool(&cmake, &extensions, host.platform)?;

    println!("program:  {}", cmake.program().display());
    println!(
        "version:  {}",
        check
            .version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(unknown)".to_string())
    );
    println!("platform: {}", host.platform);
    println!("64-bit:   {}", host.is_64bit);
    println!("global:   {}", source(config.global_config_loaded_from()));
    println!("project:  {}", source(config.project_config_loaded_from()));

    Ok(())
}

fn source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string())
}
