//! Router File Maintainer - wires a controller into its domain router.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{DomainPath, FeatureName, RouteSpec, RouterPlan, RuntimeLayout, router},
    error::{ForgeError, ForgeResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterOutcome {
    Created(PathBuf),
    Appended { path: PathBuf, lines: usize },
    Unchanged(PathBuf),
}

impl RouterOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Created(p) | Self::Unchanged(p) => p,
            Self::Appended { path, .. } => path,
        }
    }
}

pub struct RouterMaintainer {
    filesystem: Arc<dyn Filesystem>,
}

impl RouterMaintainer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Make sure the domain router imports the feature's controller and
    /// registers its `GET` route.
    #[instrument(skip_all, fields(domain = %domain, feature = %feature))]
    pub fn ensure_route(
        &self,
        layout: &RuntimeLayout,
        domain: &DomainPath,
        feature: &FeatureName,
    ) -> ForgeResult<RouterOutcome> {
        let spec = RouteSpec::new(domain, feature)?;
        let path = layout.project_path(&spec.router_file);
        let mut outcome = None;

        self.filesystem.with_lock(&path, &mut || {
            let existing = if self.filesystem.exists(&path) {
                Some(self.filesystem.read_to_string(&path)?)
            } else {
                None
            };

            outcome = Some(match router::plan(existing.as_deref(), &spec) {
                RouterPlan::Create(text) => {
                    self.filesystem.write_atomic(&path, &text)?;
                    info!(path = %path.display(), "Router created");
                    RouterOutcome::Created(path.clone())
                }
                RouterPlan::Append { text, added } => {
                    self.filesystem.write_atomic(&path, &text)?;
                    info!(path = %path.display(), lines = added.len(), "Router updated");
                    RouterOutcome::Appended {
                        path: path.clone(),
                        lines: added.len(),
                    }
                }
                RouterPlan::Unchanged => RouterOutcome::Unchanged(path.clone()),
            });
            Ok(())
        })?;

        outcome.ok_or_else(|| ForgeError::Internal {
            message: format!("lock on {} released without running", path.display()),
        })
    }
}
