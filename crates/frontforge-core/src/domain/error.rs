// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they cross the best-effort boundary in orchestrators)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid feature name '{name}': {reason}")]
    InvalidFeature { name: String, reason: String },

    #[error("Invalid domain '{domain}': {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("Invalid variant name '{name}'")]
    InvalidVariant { name: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unknown artifact kind: {0}")]
    UnknownArtifactKind(String),

    #[error("Malformed {file}: {reason}")]
    MalformedManifest { file: String, reason: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("{kind} has no {role} variant named '{variant}'")]
    UnknownVariant {
        kind: String,
        role: String,
        variant: String,
    },

    #[error("Placeholder '${{{placeholder}}}' in {template} has no value")]
    MissingPlaceholderValue {
        template: String,
        placeholder: String,
    },

    #[error("Unsubstituted placeholder '${{{placeholder}}}' left in {template}")]
    ResidualPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Template {template} has no '{token}' splice point")]
    MissingSplicePoint { template: String, token: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFeature { .. } | Self::InvalidDomain { .. } => vec![
                "Use the form <domain>/<feature>, e.g. admin/reports/summary".into(),
                "Segments may contain letters, digits, '-' and '_'".into(),
            ],
            Self::UnknownVariant { kind, role, .. } => {
                let mut out = vec![format!("Declared {role} variants for {kind}:")];
                out.extend(
                    crate::domain::catalog::declared_variants_by_name(kind, role)
                        .into_iter()
                        .map(|v| format!("  • {v}")),
                );
                out
            }
            Self::MissingPlaceholderValue { template, .. }
            | Self::ResidualPlaceholder { template, .. } => vec![
                format!("Template {template} uses a placeholder it does not declare"),
                "Check the template against the fragment catalog".into(),
            ],
            Self::MissingSplicePoint { token, .. } => vec![format!(
                "Add the line '{token}' inside the server block of the base config"
            )],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFeature { .. }
            | Self::InvalidDomain { .. }
            | Self::InvalidVariant { .. }
            | Self::InvalidPath { .. }
            | Self::UnknownArtifactKind(_)
            | Self::MalformedManifest { .. } => ErrorCategory::Validation,
            Self::UnknownVariant { .. } => ErrorCategory::NotFound,
            Self::MissingPlaceholderValue { .. }
            | Self::ResidualPlaceholder { .. }
            | Self::MissingSplicePoint { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Template,
}
