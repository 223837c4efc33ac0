//! `frontforge create` - frontends, controllers and services.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use frontforge_adapters::{DirectoryFragmentLibrary, SystemProcessRunner};
use frontforge_core::{
    application::{FrontendOptions, GenerationReport, GenerationService, RouterOutcome},
    domain::{ArtifactKind, DomainError, FeatureDescriptor, RuntimeLayout},
};

use crate::{
    cli::{BackendArgs, CreateCommands, FrontendArgs, GlobalArgs},
    commands::{local_filesystem, runtime_layout},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    cmd: CreateCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = runtime_layout(&global, &config)?;
    let service = generation_service(&layout, &config);

    let (what, report) = match cmd {
        CreateCommands::Frontend(args) => {
            let (descriptor, options) = frontend_request(&args)?;
            output.info(&format!(
                "Scaffolding {descriptor}, this runs npm and may take a while..."
            ))?;
            ("Frontend", service.create_frontend(&layout, &descriptor, &options)?)
        }
        CreateCommands::Controller(args) => {
            let descriptor = backend_request(ArtifactKind::Controller, &args)?;
            ("Controller", service.create_controller(&layout, &descriptor)?)
        }
        CreateCommands::Service(args) => {
            let descriptor = backend_request(ArtifactKind::Service, &args)?;
            ("Service", service.create_service(&layout, &descriptor)?)
        }
    };

    print_report(&output, what, &report)
}

fn generation_service(layout: &RuntimeLayout, config: &AppConfig) -> GenerationService {
    GenerationService::new(
        local_filesystem(),
        Arc::new(DirectoryFragmentLibrary::new(layout.template_root())),
        Arc::new(SystemProcessRunner::new()),
        config.generation_settings(),
    )
}

fn frontend_request(args: &FrontendArgs) -> Result<(FeatureDescriptor, FrontendOptions), DomainError> {
    let descriptor = FeatureDescriptor::parse(ArtifactKind::Frontend, &args.path)?;
    let options = FrontendOptions {
        port: args.port,
        router: args.router,
    };
    Ok((descriptor, options))
}

fn backend_request(kind: ArtifactKind, args: &BackendArgs) -> Result<FeatureDescriptor, DomainError> {
    let mut descriptor = FeatureDescriptor::parse(kind, &args.path)?;
    if let Some(variant) = &args.constructor {
        descriptor = descriptor.with_constructor(variant)?;
    }
    if let Some(variant) = &args.method {
        descriptor = descriptor.with_method(variant)?;
    }
    Ok(descriptor)
}

fn print_report(output: &OutputManager, what: &str, report: &GenerationReport) -> CliResult<()> {
    output.warnings(&report.warnings)?;

    if output.is_json() {
        let value = json!({
            "runId": report.run_id.to_string(),
            "written": report.written,
            "skipped": report.skipped,
            "router": report.router.as_ref().map(|r| r.path()),
            "commands": report.commands,
            "warnings": report.warnings,
        });
        return output.json(&value).map_err(CliError::from);
    }

    for path in &report.written {
        output.print(&format!("  created {}", path.display()))?;
    }
    match &report.router {
        Some(RouterOutcome::Created(path)) => {
            output.print(&format!("  created {}", path.display()))?;
        }
        Some(RouterOutcome::Appended { path, lines }) => {
            output.print(&format!("  updated {} (+{lines} routes)", path.display()))?;
        }
        Some(RouterOutcome::Unchanged(_)) | None => {}
    }
    output.success(&format!("{what} generated"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_args(path: &str, constructor: Option<&str>) -> BackendArgs {
        BackendArgs {
            path: path.into(),
            constructor: constructor.map(Into::into),
            method: None,
        }
    }

    #[test]
    fn backend_request_applies_variants() {
        let descriptor = backend_request(
            ArtifactKind::Controller,
            &backend_args("shop/cart", Some("byFeature")),
        )
        .unwrap();
        assert_eq!(
            descriptor.constructor_variant().map(|v| v.to_string()).as_deref(),
            Some("byFeature")
        );
    }

    #[test]
    fn backend_request_rejects_unknown_variant() {
        let err = backend_request(
            ArtifactKind::Service,
            &backend_args("shop/cart", Some("nope")),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::UnknownVariant { .. }));
    }

    #[test]
    fn frontend_request_keeps_port_override() {
        let args = FrontendArgs {
            path: "admin/reports/summary".into(),
            port: Some(5200),
            router: true,
        };
        let (_, options) = frontend_request(&args).unwrap();
        assert_eq!(options.port, Some(5200));
        assert!(options.router);
    }

    #[test]
    fn malformed_path_is_rejected() {
        let args = FrontendArgs {
            path: "summary".into(),
            port: None,
            router: false,
        };
        assert!(frontend_request(&args).is_err());
    }
}
