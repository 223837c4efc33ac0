//! Build Service - production builds for every registered front.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ports::{CommandSpec, Filesystem, ProcessRunner},
        services::RegistryStore,
    },
    domain::{FrontEntry, RegistryKind, RuntimeLayout},
    error::ForgeResult,
};

/// Progress notifications, one `Started` and one finishing event per front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent<'a> {
    Started {
        index: usize,
        total: usize,
        front: &'a FrontEntry,
    },
    Built { front: &'a FrontEntry },
    Skipped { front: &'a FrontEntry, reason: &'a str },
    Failed { front: &'a FrontEntry, reason: &'a str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub built: Vec<String>,
    pub skipped: Vec<(String, String)>,
    pub failed: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.built.len() + self.skipped.len() + self.failed.len()
    }
}

pub struct BuildService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
    registries: RegistryStore,
}

impl BuildService {
    pub fn new(filesystem: Arc<dyn Filesystem>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            registries: RegistryStore::new(Arc::clone(&filesystem)),
            filesystem,
            runner,
        }
    }

    pub fn build_all(&self, layout: &RuntimeLayout) -> ForgeResult<BuildReport> {
        self.build_all_with(layout, &mut |_| {})
    }

    /// Run `npm run build` in each front's directory, in registry order.
    /// Missing directories and failed builds are reported and skipped.
    #[instrument(skip_all)]
    pub fn build_all_with(
        &self,
        layout: &RuntimeLayout,
        on_event: &mut dyn FnMut(BuildEvent<'_>),
    ) -> ForgeResult<BuildReport> {
        let registry = self
            .registries
            .load::<FrontEntry>(&layout.registry_path(RegistryKind::Fronts))?;
        let total = registry.entries.len();
        info!(fronts = total, "Building fronts");

        let mut report = BuildReport {
            warnings: registry.warnings,
            ..BuildReport::default()
        };

        for (index, front) in registry.entries.iter().enumerate() {
            on_event(BuildEvent::Started {
                index,
                total,
                front,
            });

            let dir: PathBuf = layout.project_path(
                front
                    .project_full_path
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .collect::<PathBuf>(),
            );
            if !self.filesystem.is_dir(&dir) {
                let reason = format!("directory {} not found", dir.display());
                warn!(front = %front.name, "{reason}");
                on_event(BuildEvent::Skipped {
                    front,
                    reason: &reason,
                });
                report.skipped.push((front.name.clone(), reason));
                continue;
            }

            match self.runner.run(&CommandSpec::npm(&dir, ["run", "build"])) {
                Ok(()) => {
                    info!(front = %front.name, "Built");
                    on_event(BuildEvent::Built { front });
                    report.built.push(front.name.clone());
                }
                Err(e) => {
                    let reason = e.to_string();
                    error!(front = %front.name, "Build failed: {reason}");
                    on_event(BuildEvent::Failed {
                        front,
                        reason: &reason,
                    });
                    report.failed.push((front.name.clone(), reason));
                }
            }
        }

        Ok(report)
    }
}
