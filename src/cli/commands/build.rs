//! build and plan commands - Build native extensions or preview the build

use anyhow::{Context as _, Result};

use super::{cmake_tool, load_config, resolve_flag_program, verbosity};
use crate::core::config::Config;
use crate::core::paths::{resolve_program, BuildPaths};
use crate::core::platform::HostPlatform;
use crate::engine::tool::find_python;
use crate::engine::{BackendConfig, BuildEnv, BuildOptions, BuildTool, Context, Orchestrator};
use crate::ui::output;

/// Assemble orchestrator options from configuration and flags.
pub fn build_options(ctx: &Context, config: &Config, backend: BackendConfig) -> Result<BuildOptions> {
    let project = config.require_project()?;

    let explicit = match &ctx.python {
        Some(flag) => Some(resolve_flag_program(flag)?),
        None => config
            .python()
            .map(|p| resolve_program(p, config.project_dir())),
    };
    let python = find_python(explicit).context(
        "No Python interpreter found on PATH. Pass --python or set `python` in basalt-build.toml",
    )?;

    Ok(BuildOptions {
        host: HostPlatform::detect(),
        paths: BuildPaths::from_config(config),
        python,
        option_prefix: config.option_prefix().to_string(),
        backend,
        version: project.package.version.clone(),
        ambient: BuildEnv::capture(),
    })
}

/// Configure and build every extension.
pub fn build(ctx: &Context, backend: BackendConfig) -> Result<()> {
    let config = load_config(ctx)?;
    let extensions = config.extensions()?;
    let options = build_options(ctx, &config, backend)?;
    let cmake = cmake_tool(ctx, &config)?;
    let verbosity = verbosity(ctx);

    output::print(
        format!(
            "Building {} extension(s) ({} backend)",
            extensions.len(),
            backend
        ),
        verbosity,
    );

    let report = Orchestrator::new(&cmake, options).run(&extensions)?;

    for built in &report.built {
        output::print(
            format!("Built {} -> {}", built.name, built.output_dir.display()),
            verbosity,
        );
    }

    Ok(())
}

/// Print the invocations a build would run, without running them.
pub fn plan(ctx: &Context, backend: BackendConfig) -> Result<()> {
    let config = load_config(ctx)?;
    let extensions = config.extensions()?;
    let options = build_options(ctx, &config, backend)?;
    let cmake = cmake_tool(ctx, &config)?;

    let orchestrator = Orchestrator::new(&cmake, options);
    for plan in orchestrator.plan_all(&extensions) {
        println!("{}", output::format_plan(cmake.program(), &plan));
    }

    Ok(())
}
