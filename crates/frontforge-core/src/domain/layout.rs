use std::path::{Path, PathBuf};

use crate::domain::registry::RegistryKind;

/// Directory (relative to the project root) holding generator state.
pub const STATE_DIR: &str = ".frontforge";

/// Where the project and the template set live for this process.
///
/// Resolved once at startup and shared by every component; nothing else
/// derives locations from the working directory or the executable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLayout {
    project_root: PathBuf,
    template_root: PathBuf,
}

impl RuntimeLayout {
    pub fn new(project_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            template_root: template_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Resolve a project-relative path.
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(relative)
    }

    pub fn template_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.template_root.join(relative)
    }

    pub fn registry_path(&self, kind: RegistryKind) -> PathBuf {
        self.project_path(kind.relative_path())
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_path(Path::new(STATE_DIR).join("config.json"))
    }

    /// `<templates>/frontend`, copied over each new front.
    pub fn frontend_template_dir(&self) -> PathBuf {
        self.template_path("frontend")
    }

    /// `<templates>/backend-init`, laid over a project by `init --backend express`.
    pub fn backend_init_template_dir(&self) -> PathBuf {
        self.template_path("backend-init")
    }

    /// `<templates>/docker/default.conf.tpl`
    pub fn proxy_template_path(&self) -> PathBuf {
        self.template_path(Path::new("docker").join("default.conf.tpl"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_their_roots() {
        let layout = RuntimeLayout::new("/work/app", "/opt/ff/templates");
        assert_eq!(
            layout.registry_path(RegistryKind::Fronts),
            PathBuf::from("/work/app/.frontforge/frontForgeFronts.json")
        );
        assert_eq!(
            layout.project_config_path(),
            PathBuf::from("/work/app/.frontforge/config.json")
        );
        assert_eq!(
            layout.proxy_template_path(),
            PathBuf::from("/opt/ff/templates/docker/default.conf.tpl")
        );
    }
}
