//! Domain value objects: ArtifactKind, FragmentRole, VariantName, BackendFlavor.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold NO template knowledge; which variants exist for which kind lives in
//! `catalog.rs`. This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ArtifactKind ──────────────────────────────────────────────────────────────

/// The kind of artifact a feature request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Controller,
    Service,
    Frontend,
}

impl ArtifactKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Frontend => "frontend",
        }
    }

    /// Whether this kind is composed from backend template fragments.
    pub const fn is_backend(self) -> bool {
        matches!(self, Self::Controller | Self::Service)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "controller" => Ok(Self::Controller),
            "service" => Ok(Self::Service),
            "frontend" | "front" | "preact" => Ok(Self::Frontend),
            other => Err(DomainError::UnknownArtifactKind(other.to_string())),
        }
    }
}

// ── FragmentRole ──────────────────────────────────────────────────────────────

/// The role a template fragment plays when composing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentRole {
    /// The whole-file skeleton the other fragments are spliced into.
    Base,
    Constructor,
    Method,
}

impl FragmentRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Constructor => "constructor",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for FragmentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "constructor" => Ok(Self::Constructor),
            "method" => Ok(Self::Method),
            other => Err(DomainError::InvalidVariant {
                name: other.to_string(),
            }),
        }
    }
}

// ── VariantName ───────────────────────────────────────────────────────────────

/// Name of a constructor or method variant, e.g. `byRole` or `front`.
///
/// Variant names double as fragment file stems, so they are restricted to
/// ASCII alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantName(String);

impl VariantName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidVariant { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VariantName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ── BackendFlavor ─────────────────────────────────────────────────────────────

/// Which backend the current project uses, read from the project config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendFlavor {
    /// Controller and service stubs are generated.
    Express,
    /// No backend; stub generation is skipped.
    #[default]
    None,
    /// Any other value found in the project config.
    Other(String),
}

impl BackendFlavor {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Express => "express",
            Self::None => "none",
            Self::Other(s) => s,
        }
    }

    pub fn generates_stubs(&self) -> bool {
        matches!(self, Self::Express)
    }
}

impl fmt::Display for BackendFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BackendFlavor {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "express" => Self::Express,
            "" | "none" | "unknown" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }
}
