//! `frontforge init` - project config, empty registries and, for express,
//! the backend skeleton.

use std::sync::Arc;

use frontforge_adapters::SystemProcessRunner;
use frontforge_core::{
    application::{InitOptions, ProjectService},
    domain::BackendFlavor,
};
use serde_json::json;

use crate::{
    cli::{Backend, GlobalArgs, InitArgs},
    commands::{local_filesystem, runtime_layout},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = runtime_layout(&global, &config)?;
    output.info(&format!(
        "Initialising {}...",
        layout.project_root().display()
    ))?;

    let options = InitOptions::new(flavor(args.backend))
        .force(args.force)
        .install_dependencies(!args.skip_install);
    let report = ProjectService::new(local_filesystem(), Arc::new(SystemProcessRunner::new()))
        .init_project(&layout, &options)?;

    output.warnings(&report.warnings)?;
    if output.is_json() {
        output.json(&json!({
            "config": report.config_path,
            "backend": report.flavor.to_string(),
            "registries": report.created_registries,
            "scaffolded": report.scaffolded,
            "kept": report.kept,
            "installed": report.installed,
            "warnings": report.warnings,
        }))?;
        return Ok(());
    }

    for path in report.created_registries.iter().chain(&report.scaffolded) {
        output.print(&format!("  created {}", path.display()))?;
    }
    for path in &report.kept {
        output.print(&format!("  kept    {}", path.display()))?;
    }
    output.success(&format!(
        "Project initialised (backend: {}) at {}",
        report.flavor,
        report.config_path.display()
    ))?;
    if report.flavor.generates_stubs() && !report.installed {
        output.info("Run `npm install` in the project root before `npm run dev`")?;
    }
    Ok(())
}

fn flavor(backend: Backend) -> BackendFlavor {
    match backend {
        Backend::Express => BackendFlavor::Express,
        Backend::None => BackendFlavor::None,
    }
}
