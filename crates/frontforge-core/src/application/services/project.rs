//! Project Service - the per-project config file and registry bootstrap.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandSpec, Filesystem, ProcessRunner},
    },
    domain::{BackendFlavor, ProjectConfig, RegistryKind, RuntimeLayout, registry},
    error::{Context, ForgeError, ForgeResult},
};

/// Directories an express backend expects, created even when empty.
const BACKEND_DIRS: &[&str] = &["config", "public", "src/routes"];

/// What `init_project` should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub flavor: BackendFlavor,
    /// Replace an existing project config.
    pub force: bool,
    /// Run `npm install` once the backend skeleton is in place.
    pub install_dependencies: bool,
}

impl InitOptions {
    pub fn new(flavor: BackendFlavor) -> Self {
        Self {
            flavor,
            force: false,
            install_dependencies: true,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn install_dependencies(mut self, install: bool) -> Self {
        self.install_dependencies = install;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub flavor: BackendFlavor,
    /// Registry files created empty (existing ones are left alone).
    pub created_registries: Vec<PathBuf>,
    /// Backend skeleton files written.
    pub scaffolded: Vec<PathBuf>,
    /// Backend skeleton files that already existed and were kept.
    pub kept: Vec<PathBuf>,
    /// `npm install` ran and succeeded.
    pub installed: bool,
    pub warnings: Vec<String>,
}

impl InitReport {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// Where a skeleton file lands. A leading `_` stands for a leading dot, so
/// the template set can ship `.env` and `.gitignore` without them taking
/// effect inside the template directory itself.
pub fn skeleton_target(relative: &Path) -> PathBuf {
    match relative
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix('_'))
    {
        Some(rest) => relative.with_file_name(format!(".{rest}")),
        None => relative.to_path_buf(),
    }
}

pub struct ProjectService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
}

impl ProjectService {
    pub fn new(filesystem: Arc<dyn Filesystem>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { filesystem, runner }
    }

    /// Read `.frontforge/config.json`. A missing file means no backend.
    pub fn load_config(&self, layout: &RuntimeLayout) -> ForgeResult<ProjectConfig> {
        let path = layout.project_config_path();
        if !self.filesystem.exists(&path) {
            debug!(path = %path.display(), "No project config, assuming no backend");
            return Ok(ProjectConfig::default());
        }
        let text = self.filesystem.read_to_string(&path)?;
        serde_json::from_str(&text).map_err(|e| {
            ForgeError::configuration(format!("{} is not valid: {e}", path.display()))
        })
    }

    pub fn backend(&self, layout: &RuntimeLayout) -> ForgeResult<BackendFlavor> {
        Ok(self.load_config(layout)?.backend())
    }

    /// Fail unless the project generates express stubs.
    pub fn require_backend(&self, layout: &RuntimeLayout) -> ForgeResult<()> {
        let flavor = self.backend(layout)?;
        if flavor.generates_stubs() {
            Ok(())
        } else {
            Err(ApplicationError::BackendNotEnabled {
                flavor: flavor.to_string(),
            }
            .into())
        }
    }

    /// Write the project config and create empty registries. An express
    /// project also gets the backend skeleton every generated stub imports
    /// from, and optionally `npm install`.
    #[instrument(skip_all, fields(flavor = %options.flavor, force = options.force))]
    pub fn init_project(
        &self,
        layout: &RuntimeLayout,
        options: &InitOptions,
    ) -> ForgeResult<InitReport> {
        let config_path = layout.project_config_path();
        if self.filesystem.exists(&config_path) {
            if !options.force {
                return Err(ApplicationError::AlreadyInitialized { path: config_path }.into());
            }
            warn!(path = %config_path.display(), "Overwriting project config");
        }

        let skeleton = layout.backend_init_template_dir();
        let express = options.flavor.generates_stubs();
        if express && !self.filesystem.is_dir(&skeleton) {
            return Err(ApplicationError::TemplateNotFound {
                key: "backend-init".into(),
                path: skeleton,
            }
            .into());
        }

        let mut text = serde_json::to_string_pretty(&ProjectConfig::new(&options.flavor))
            .context("serializing project config")?;
        text.push('\n');
        self.filesystem.write_atomic(&config_path, &text)?;

        let mut report = InitReport {
            config_path,
            flavor: options.flavor.clone(),
            ..InitReport::default()
        };

        let mut kinds = vec![RegistryKind::Fronts];
        if express {
            kinds.extend([RegistryKind::Controllers, RegistryKind::Services]);
        }
        let empty = registry::serialize_registry(&[]).context("serializing registry")?;
        for kind in kinds {
            let path = layout.registry_path(kind);
            if self.filesystem.exists(&path) {
                continue;
            }
            match self.filesystem.write_new(&path, &empty) {
                Ok(()) => report.created_registries.push(path),
                // created concurrently; that one wins
                Err(ForgeError::Application(ApplicationError::ArtifactConflict { .. })) => {}
                Err(e) => return Err(e),
            }
        }

        if express {
            self.lay_skeleton(layout, &skeleton, &mut report)?;
            if options.install_dependencies {
                self.install(layout, &mut report);
            } else {
                debug!("Dependency install skipped");
            }
        }

        info!(
            config = %report.config_path.display(),
            registries = report.created_registries.len(),
            scaffolded = report.scaffolded.len(),
            "Project initialized"
        );
        Ok(report)
    }

    /// Copy the skeleton into the project. Files already present win.
    fn lay_skeleton(
        &self,
        layout: &RuntimeLayout,
        skeleton: &Path,
        report: &mut InitReport,
    ) -> ForgeResult<()> {
        for dir in BACKEND_DIRS {
            self.filesystem.create_dir_all(&layout.project_path(dir))?;
        }
        for relative in self.filesystem.list_files(skeleton)? {
            let content = self.filesystem.read_to_string(&skeleton.join(&relative))?;
            let target = layout.project_path(skeleton_target(&relative));
            match self.filesystem.write_new(&target, &content) {
                Ok(()) => report.scaffolded.push(target),
                Err(ForgeError::Application(ApplicationError::ArtifactConflict { .. })) => {
                    debug!(path = %target.display(), "Keeping existing file");
                    report.kept.push(target);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// `npm install` in the project root. A failure leaves a warning.
    fn install(&self, layout: &RuntimeLayout, report: &mut InitReport) {
        let command = CommandSpec::npm(layout.project_root(), ["install"]);
        match self.runner.run(&command) {
            Ok(()) => report.installed = true,
            Err(e) => report.warn(format!(
                "{command} failed, run it by hand in {}: {e}",
                layout.project_root().display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscore_names_become_dotfiles() {
        assert_eq!(skeleton_target(Path::new("_gitignore")), PathBuf::from(".gitignore"));
        assert_eq!(skeleton_target(Path::new("_env")), PathBuf::from(".env"));
        assert_eq!(
            skeleton_target(Path::new("src/classes/generic/token.ts")),
            PathBuf::from("src/classes/generic/token.ts")
        );
    }

    #[test]
    fn options_default_to_installing() {
        let options = InitOptions::new(BackendFlavor::Express);
        assert!(options.install_dependencies);
        assert!(!options.force);
        assert!(!options.install_dependencies(false).install_dependencies);
    }
}
