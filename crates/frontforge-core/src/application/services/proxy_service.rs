//! Proxy Service - renders the nginx config from the fronts registry.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::RegistryStore},
    domain::{FrontEntry, ProxySettings, RegistryKind, RuntimeLayout, import_path::to_posix, nginx},
    error::ForgeResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyReport {
    pub output: PathBuf,
    pub locations: usize,
    pub warnings: Vec<String>,
}

pub struct ProxyService {
    filesystem: Arc<dyn Filesystem>,
    registries: RegistryStore,
}

impl ProxyService {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            registries: RegistryStore::new(Arc::clone(&filesystem)),
            filesystem,
        }
    }

    /// Write `<output_dir>/default.conf` with one location per front.
    #[instrument(skip_all, fields(output_dir = %output_dir))]
    pub fn write_proxy_config(
        &self,
        layout: &RuntimeLayout,
        settings: &ProxySettings,
        output_dir: &str,
    ) -> ForgeResult<ProxyReport> {
        let template_path = layout.proxy_template_path();
        if !self.filesystem.exists(&template_path) {
            return Err(ApplicationError::TemplateNotFound {
                key: "docker/default.conf".into(),
                path: template_path,
            }
            .into());
        }
        let template = self.filesystem.read_to_string(&template_path)?;

        let fronts = self
            .registries
            .load::<FrontEntry>(&layout.registry_path(RegistryKind::Fronts))?;
        let blocks = nginx::generate(&fronts.entries, settings);
        let config = nginx::render_config(&to_posix(&template_path), &template, &blocks)?;

        let output = layout.project_path(output_dir).join("default.conf");
        self.filesystem.write_atomic(&output, &config)?;
        info!(
            path = %output.display(),
            locations = fronts.entries.len(),
            "Proxy config written"
        );

        Ok(ProxyReport {
            output,
            locations: fronts.entries.len(),
            warnings: fronts.warnings,
        })
    }
}
