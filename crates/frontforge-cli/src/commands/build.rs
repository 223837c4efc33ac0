//! `frontforge build` - production build of every registered front.

use std::io;
use std::sync::Arc;

use serde_json::json;

use frontforge_adapters::SystemProcessRunner;
use frontforge_core::application::{BuildEvent, BuildService};

use crate::{
    cli::{BuildArgs, GlobalArgs},
    commands::{local_filesystem, runtime_layout},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = runtime_layout(&global, &config)?;
    let service = BuildService::new(local_filesystem(), Arc::new(SystemProcessRunner::new()));

    output.header("Building fronts")?;
    let progress = output.progress(0);
    // the event callback cannot fail; the first write error is kept for later
    let mut write_error: Option<io::Error> = None;
    let mut note = |line: String| {
        if !progress.is_hidden() {
            progress.println(line);
        } else if !output.is_json()
            && let Err(e) = output.print(&line)
        {
            write_error.get_or_insert(e);
        }
    };
    let report = service.build_all_with(&layout, &mut |event: BuildEvent<'_>| match event {
        BuildEvent::Started {
            index,
            total,
            front,
        } => {
            progress.set_length(total as u64);
            progress.set_position(index as u64);
            progress.set_message(format!("building {}", front.name));
        }
        BuildEvent::Built { front } => note(format!("  built {}", front.name)),
        BuildEvent::Skipped { front, reason } => {
            note(format!("  skipped {}: {reason}", front.name));
        }
        BuildEvent::Failed { front, reason } => {
            note(format!("  failed {}: {reason}", front.name));
        }
    })?;
    progress.finish_and_clear();
    if let Some(e) = write_error {
        return Err(e.into());
    }

    output.warnings(&report.warnings)?;
    if output.is_json() {
        output.json(&json!({
            "built": report.built,
            "skipped": report.skipped,
            "failed": report.failed,
            "warnings": report.warnings,
        }))?;
    } else if report.total() == 0 {
        output.info("No fronts registered, nothing to build")?;
    } else if report.failed.is_empty() {
        output.success(&format!(
            "{} built, {} skipped",
            report.built.len(),
            report.skipped.len()
        ))?;
    } else {
        output.warning(&format!(
            "{} built, {} skipped, {} failed",
            report.built.len(),
            report.skipped.len(),
            report.failed.len()
        ))?;
    }

    if args.strict && !report.failed.is_empty() {
        return Err(CliError::BuildFailed {
            failed: report.failed.len(),
            total: report.total(),
        });
    }
    Ok(())
}
