//! Command handlers, one module per subcommand.
//!
//! Handlers receive parsed arguments, the loaded [`AppConfig`] and an
//! [`OutputManager`]; they build the adapters they need and call into
//! `frontforge-core`.

pub mod build;
pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod nginx;

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use frontforge_adapters::LocalFilesystem;
use frontforge_core::{application::Filesystem, domain::RuntimeLayout};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
};

/// Resolve the project root (`-C` or the current directory) and the
/// template root, both absolute. Every path written to a registry hangs off
/// the project root.
pub(crate) fn runtime_layout(global: &GlobalArgs, config: &AppConfig) -> CliResult<RuntimeLayout> {
    let project_root = match &global.project {
        Some(dir) => absolute(dir)?,
        None => std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?,
    };
    let template_root = config
        .template_root(global.templates.as_deref())
        .with_cli_context(|| "Failed to resolve the template root")?;
    let template_root = absolute(&template_root)?;

    debug!(
        project = %project_root.display(),
        templates = %template_root.display(),
        "Runtime layout resolved"
    );
    Ok(RuntimeLayout::new(project_root, template_root))
}

/// `dir` joined onto the working directory when relative, with `.` and
/// `..` resolved lexically.
fn absolute(dir: &Path) -> CliResult<PathBuf> {
    let joined = std::path::absolute(dir)
        .with_cli_context(|| format!("Failed to resolve {}", dir.display()))?;
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

pub(crate) fn local_filesystem() -> Arc<dyn Filesystem> {
    Arc::new(LocalFilesystem::new())
}
