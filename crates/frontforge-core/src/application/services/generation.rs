//! Generation Service - the `create_*` orchestrators.
//!
//! This service coordinates a whole feature request:
//! 1. Compose the artifact text
//! 2. Write it under the step's conflict policy
//! 3. Record it in its registry
//! 4. Wire controllers into the domain router
//!
//! `create_frontend` wraps the same steps around the frontend scaffold and
//! runs the backend stubs best-effort: their failures become warnings in the
//! report instead of aborting the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, info_span, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{CommandSpec, Filesystem, FragmentLibrary, ProcessRunner},
        services::{
            ArtifactComposer, ConflictPolicy, GeneratedArtifact, ProjectService, RegistryStore,
            RouterMaintainer, RouterOutcome,
        },
    },
    domain::{
        ArtifactEntry, ArtifactKind, FeatureDescriptor, FrontPlacement, RegistryKind,
        RuntimeLayout, UpsertOutcome, frontend, import_path::to_posix,
    },
    error::{ForgeError, ForgeResult},
};

/// Tunables for frontend generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Project directory holding the fronts.
    pub fronts_root: String,
    pub default_port: u16,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            fronts_root: "fronts".into(),
            default_port: 5173,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendOptions {
    /// Dev-server port; falls back to the configured default.
    pub port: Option<u16>,
    /// Also install a client-side router (`wouter`).
    pub router: bool,
}

/// One invocation. Every target path is written at most once.
#[derive(Debug)]
pub struct GenerationRun {
    id: Uuid,
    written: HashSet<PathBuf>,
}

impl GenerationRun {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            written: HashSet::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Reserve `path` for writing in this run.
    pub fn claim(&mut self, path: &Path) -> ForgeResult<()> {
        if self.written.insert(path.to_path_buf()) {
            Ok(())
        } else {
            Err(ApplicationError::DuplicateWrite {
                path: path.to_path_buf(),
                run_id: self.id.to_string(),
            }
            .into())
        }
    }
}

impl Default for GenerationRun {
    fn default() -> Self {
        Self::new()
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub written: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
    pub registry_updates: Vec<(RegistryKind, UpsertOutcome)>,
    pub router: Option<RouterOutcome>,
    pub commands: Vec<String>,
    pub warnings: Vec<String>,
}

impl GenerationReport {
    fn new(run: &GenerationRun) -> Self {
        Self {
            run_id: run.id(),
            written: Vec::new(),
            skipped: Vec::new(),
            registry_updates: Vec::new(),
            router: None,
            commands: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

pub struct GenerationService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
    composer: ArtifactComposer,
    registries: RegistryStore,
    routers: RouterMaintainer,
    project: ProjectService,
    settings: GenerationSettings,
}

impl GenerationService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        fragments: Arc<dyn FragmentLibrary>,
        runner: Arc<dyn ProcessRunner>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            composer: ArtifactComposer::new(fragments),
            registries: RegistryStore::new(Arc::clone(&filesystem)),
            routers: RouterMaintainer::new(Arc::clone(&filesystem)),
            project: ProjectService::new(Arc::clone(&filesystem), Arc::clone(&runner)),
            filesystem,
            runner,
            settings,
        }
    }

    // -------------------------------------------------------------------------
    // Direct entry points
    // -------------------------------------------------------------------------

    /// Generate a controller, register it and wire its route. Any failure,
    /// including an existing file, aborts.
    pub fn create_controller(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
    ) -> ForgeResult<GenerationReport> {
        self.create_backend(layout, descriptor, ArtifactKind::Controller)
    }

    /// Generate a service and register it. Any failure aborts.
    pub fn create_service(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
    ) -> ForgeResult<GenerationReport> {
        self.create_backend(layout, descriptor, ArtifactKind::Service)
    }

    fn create_backend(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
        kind: ArtifactKind,
    ) -> ForgeResult<GenerationReport> {
        if descriptor.kind() != kind {
            return Err(ForgeError::Internal {
                message: format!("expected a {kind} descriptor, got {}", descriptor.kind()),
            });
        }
        self.project.require_backend(layout)?;

        let mut run = GenerationRun::new();
        let span = info_span!("generate", run_id = %run.id(), artifact = %descriptor);
        let _guard = span.enter();

        let mut report = GenerationReport::new(&run);
        self.generate_backend(layout, descriptor, ConflictPolicy::Abort, &mut run, &mut report)?;
        info!(written = report.written.len(), "Generation finished");
        Ok(report)
    }

    /// Scaffold a frontend micro-app and, for express projects, its
    /// controller and service stubs.
    #[instrument(skip_all, fields(feature = %descriptor))]
    pub fn create_frontend(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
        options: &FrontendOptions,
    ) -> ForgeResult<GenerationReport> {
        let mut run = GenerationRun::new();
        let span = info_span!("generate", run_id = %run.id());
        let _guard = span.enter();
        let mut report = GenerationReport::new(&run);

        let placement = FrontPlacement::new(&self.settings.fronts_root, descriptor);
        let port = options.port.unwrap_or(self.settings.default_port);
        let project_dir = layout.project_path(placement.project_dir());

        // 1. scaffold
        if self.filesystem.exists(&project_dir) {
            return Err(ApplicationError::ArtifactConflict { path: project_dir }.into());
        }
        if let Some(parent) = project_dir.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        run.claim(&project_dir)?;
        self.run(
            &mut report,
            CommandSpec::npm(
                layout.project_root(),
                ["init", "preact@latest", placement.project_full_path().as_str()],
            ),
        )?;

        // 2. template copy
        let template_dir = layout.frontend_template_dir();
        if !self.filesystem.is_dir(&template_dir) {
            return Err(ApplicationError::TemplateNotFound {
                key: "frontend".into(),
                path: template_dir,
            }
            .into());
        }
        let copied = self.filesystem.copy_dir_all(&template_dir, &project_dir)?;
        info!(files = copied, "Frontend template copied");

        // 3. config rewrite
        self.configure_front(&project_dir, &placement, port, &mut report)?;

        // 4. fronts registry
        let fronts = layout.registry_path(RegistryKind::Fronts);
        let upsert = self.registries.upsert(&fronts, &placement.registry_entry(port))?;
        report.warnings.extend(upsert.warnings);
        report.registry_updates.push((RegistryKind::Fronts, upsert.outcome));

        // 5. dependencies
        self.run(&mut report, CommandSpec::npm(&project_dir, ["install"]))?;
        self.run(
            &mut report,
            CommandSpec::npm(&project_dir, ["install", "--save-dev", "@types/node", "cross-env"]),
        )?;
        if options.router {
            self.run(&mut report, CommandSpec::npm(&project_dir, ["install", "wouter"]))?;
        }

        // 6. dev build
        self.run(&mut report, CommandSpec::npm(&project_dir, ["run", "build:dev"]))?;

        // 7. backend stubs, best-effort
        match self.project.backend(layout) {
            Ok(flavor) if flavor.generates_stubs() => {
                for kind in [ArtifactKind::Controller, ArtifactKind::Service] {
                    let stub = descriptor.for_kind(kind);
                    if let Err(e) = self.generate_backend(
                        layout,
                        &stub,
                        ConflictPolicy::SkipWithWarning,
                        &mut run,
                        &mut report,
                    ) {
                        report.warn(format!("{kind} stub for {stub} not generated: {e}"));
                    }
                }
            }
            Ok(flavor) => info!(%flavor, "Backend stubs skipped"),
            Err(e) => report.warn(format!("backend stubs skipped: {e}")),
        }

        info!(
            front = placement.name(),
            url = %placement.base_path(),
            "Micro-frontend generated"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn generate_backend(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
        policy: ConflictPolicy,
        run: &mut GenerationRun,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        let artifact = self.composer.compose(layout, descriptor)?;

        if !self.write_artifact(&artifact, policy, run, report)? {
            return Ok(());
        }

        let registry = match artifact.kind {
            ArtifactKind::Controller => RegistryKind::Controllers,
            _ => RegistryKind::Services,
        };
        let entry = ArtifactEntry {
            domain: descriptor.domain().to_string(),
            feature: descriptor.feature().camel().to_string(),
            path: to_posix(&artifact.path),
        };
        let upsert = self.registries.upsert(&layout.registry_path(registry), &entry)?;
        report.warnings.extend(upsert.warnings);
        report.registry_updates.push((registry, upsert.outcome));

        if artifact.kind == ArtifactKind::Controller {
            let outcome =
                self.routers
                    .ensure_route(layout, descriptor.domain(), descriptor.feature())?;
            report.router = Some(outcome);
        }
        Ok(())
    }

    /// Returns whether the file was written.
    fn write_artifact(
        &self,
        artifact: &GeneratedArtifact,
        policy: ConflictPolicy,
        run: &mut GenerationRun,
        report: &mut GenerationReport,
    ) -> ForgeResult<bool> {
        run.claim(&artifact.path)?;
        match self.filesystem.write_new(&artifact.path, &artifact.content) {
            Ok(()) => {
                info!(path = %artifact.path.display(), "{} generated", artifact.kind);
                report.written.push(artifact.path.clone());
                Ok(true)
            }
            Err(ForgeError::Application(ApplicationError::ArtifactConflict { path }))
                if policy == ConflictPolicy::SkipWithWarning =>
            {
                report.warn(format!(
                    "{} already exists, leaving it untouched",
                    path.display()
                ));
                report.skipped.push(path);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn configure_front(
        &self,
        project_dir: &Path,
        placement: &FrontPlacement,
        port: u16,
        report: &mut GenerationReport,
    ) -> ForgeResult<()> {
        let vite = project_dir.join("vite.config.ts");
        if self.filesystem.exists(&vite) {
            let text = self.filesystem.read_to_string(&vite)?;
            let text = frontend::configure_vite(&text, placement)?;
            self.filesystem.write_atomic(&vite, &text)?;
        } else {
            report.warn(format!("{} not found, base path not configured", vite.display()));
        }

        let manifest = project_dir.join("package.json");
        if self.filesystem.exists(&manifest) {
            let text = self.filesystem.read_to_string(&manifest)?;
            let text = frontend::update_package_json(&manifest, &text, port)?;
            self.filesystem.write_atomic(&manifest, &text)?;
        } else {
            report.warn(format!("{} not found, scripts not updated", manifest.display()));
        }
        Ok(())
    }

    fn run(&self, report: &mut GenerationReport, command: CommandSpec) -> ForgeResult<()> {
        info!(command = %command, cwd = %command.cwd.display(), "Running");
        self.runner.run(&command)?;
        report.commands.push(command.to_string());
        Ok(())
    }
}
