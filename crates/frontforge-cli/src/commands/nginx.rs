//! `frontforge nginx` - proxy config with one location per front.

use serde_json::json;

use frontforge_core::application::ProxyService;

use crate::{
    cli::{GlobalArgs, NginxArgs},
    commands::{local_filesystem, runtime_layout},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: NginxArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = runtime_layout(&global, &config)?;
    let output_dir = args.output.unwrap_or_else(|| config.proxy.output_dir.clone());

    let report = ProxyService::new(local_filesystem()).write_proxy_config(
        &layout,
        &config.proxy_settings(),
        &output_dir,
    )?;

    output.warnings(&report.warnings)?;
    if output.is_json() {
        output.json(&json!({
            "output": report.output,
            "locations": report.locations,
        }))?;
    } else {
        output.success(&format!(
            "Wrote {} ({} locations)",
            report.output.display(),
            report.locations
        ))?;
    }
    Ok(())
}
