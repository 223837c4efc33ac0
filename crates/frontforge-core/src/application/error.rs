//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template file is missing from the template root.
    #[error("Template {key} not found at {}", .path.display())]
    TemplateNotFound { key: String, path: PathBuf },

    /// The target of a generation step already exists.
    #[error("{} already exists", .path.display())]
    ArtifactConflict { path: PathBuf },

    /// A registry file could not be used and was treated as empty.
    #[error("Registry {} is unusable: {reason}", .path.display())]
    RegistryCorrupt { path: PathBuf, reason: String },

    /// A spawned process failed to start or exited non-zero.
    #[error("`{command}` failed in {}: {reason}", .cwd.display())]
    ProcessExecutionFailure {
        command: String,
        cwd: PathBuf,
        status: Option<i32>,
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Lock acquisition on a shared file failed.
    #[error("Could not lock {}: {reason}", .path.display())]
    StoreLockError { path: PathBuf, reason: String },

    /// Backend stubs requested for a project without an express backend.
    #[error("Backend generation is disabled for this project (backendType: {flavor})")]
    BackendNotEnabled { flavor: String },

    /// `init` found an existing project config.
    #[error("Project already initialized at {}", .path.display())]
    AlreadyInitialized { path: PathBuf },

    /// A path was scheduled for writing twice within one run.
    #[error("{} was already written in run {run_id}", .path.display())]
    DuplicateWrite { path: PathBuf, run_id: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path, .. } => vec![
                format!("Expected file: {}", path.display()),
                "Point --templates (or FRONTFORGE_TEMPLATES__ROOT) at a complete template set".into(),
            ],
            Self::ArtifactConflict { path } => vec![
                format!("Remove or rename {} to regenerate it", path.display()),
                "Pick a different feature name".into(),
            ],
            Self::RegistryCorrupt { path, .. } => vec![format!(
                "Fix or delete {}; it will be recreated",
                path.display()
            )],
            Self::ProcessExecutionFailure { command, .. } => vec![
                format!("Run `{command}` by hand to see the full output"),
                "Check that Node.js and npm are installed and on PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError { .. } => vec![
                "Another frontforge process may be running".into(),
                "Try again in a moment".into(),
            ],
            Self::BackendNotEnabled { .. } => vec![
                "Run `frontforge init --backend express --force` to enable backend stubs".into(),
            ],
            Self::AlreadyInitialized { .. } => {
                vec!["Use --force to overwrite the project config".into()]
            }
            Self::DuplicateWrite { .. } => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ArtifactConflict { .. } | Self::AlreadyInitialized { .. } => {
                ErrorCategory::Conflict
            }
            Self::ProcessExecutionFailure { .. } => ErrorCategory::External,
            Self::BackendNotEnabled { .. } => ErrorCategory::Configuration,
            Self::RegistryCorrupt { .. }
            | Self::FilesystemError { .. }
            | Self::StoreLockError { .. }
            | Self::DuplicateWrite { .. } => ErrorCategory::Internal,
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
