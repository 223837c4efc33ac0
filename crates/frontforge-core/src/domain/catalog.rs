//! Static fragment catalog.
//!
//! Every template fragment the composer may load is described exactly once
//! here by a [`FragmentDef`]: which artifact kind it belongs to, the role it
//! plays, its variant name, and the placeholders its text is allowed to use.
//!
//! # Adding a New Variant
//!
//! 1. Drop the `.tpl` file under `templates/backend/<kind>/<role>s/`
//! 2. Add one [`FragmentDef`] entry to [`FRAGMENT_CATALOG`]
//! 3. If the variant needs a new placeholder, the composer must supply it

use std::fmt;
use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{ArtifactKind, FragmentRole, VariantName};

/// Variant name used for every base template.
pub const BASE_VARIANT: &str = "base";

// ── Fragment definitions ─────────────────────────────────────────────────────

/// Describes one template fragment and the placeholders it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentDef {
    pub kind: ArtifactKind,
    pub role: FragmentRole,
    pub variant: &'static str,

    /// Placeholder names (without `${}`) this fragment may reference.
    ///
    /// Any other `${Identifier}` token in the fragment text is an error.
    pub placeholders: &'static [&'static str],

    /// Used when the caller does not pick a variant for this role.
    pub is_default: bool,
}

impl FragmentDef {
    pub fn key(&self) -> FragmentKey {
        FragmentKey {
            kind: self.kind,
            role: self.role,
            variant: self.variant.to_string(),
        }
    }
}

/// Single source of truth for the backend fragments.
pub static FRAGMENT_CATALOG: &[FragmentDef] = &[
    // ── controller ──
    FragmentDef {
        kind: ArtifactKind::Controller,
        role: FragmentRole::Base,
        variant: BASE_VARIANT,
        placeholders: &[
            "ControllerConstructor",
            "ControllerMethod",
            "FeatureCamel",
            "FeaturePascal",
            "RelativePathGenericToken",
            "RelativePathService",
        ],
        is_default: true,
    },
    FragmentDef {
        kind: ArtifactKind::Controller,
        role: FragmentRole::Constructor,
        variant: "byRole",
        placeholders: &["RelativePathController", "ControllerFileName", "SessionRole"],
        is_default: true,
    },
    FragmentDef {
        kind: ArtifactKind::Controller,
        role: FragmentRole::Constructor,
        variant: "byFeature",
        placeholders: &["FeatureCamel", "FeaturePascal"],
        is_default: false,
    },
    FragmentDef {
        kind: ArtifactKind::Controller,
        role: FragmentRole::Method,
        variant: "front",
        placeholders: &["FeatureCamel", "FeaturePascal", "FeatureKebab"],
        is_default: true,
    },
    // ── service ──
    FragmentDef {
        kind: ArtifactKind::Service,
        role: FragmentRole::Base,
        variant: BASE_VARIANT,
        placeholders: &[
            "ServiceName",
            "ConstructorCode",
            "MethodCode",
            "RelativePathGenericToken",
            "RelativePathHttpException",
        ],
        is_default: true,
    },
    FragmentDef {
        kind: ArtifactKind::Service,
        role: FragmentRole::Constructor,
        variant: "default",
        placeholders: &["FeaturePascal"],
        is_default: true,
    },
    FragmentDef {
        kind: ArtifactKind::Service,
        role: FragmentRole::Method,
        variant: "front",
        placeholders: &["Domain", "FrontName", "RoutePath", "FeatureCamel"],
        is_default: true,
    },
];

// ── Lookups ──────────────────────────────────────────────────────────────────

/// Find the fragment for `(kind, role, variant)`.
pub fn lookup(
    kind: ArtifactKind,
    role: FragmentRole,
    variant: &str,
) -> Result<&'static FragmentDef, DomainError> {
    FRAGMENT_CATALOG
        .iter()
        .find(|d| d.kind == kind && d.role == role && d.variant == variant)
        .ok_or_else(|| DomainError::UnknownVariant {
            kind: kind.to_string(),
            role: role.to_string(),
            variant: variant.to_string(),
        })
}

pub fn base_fragment(kind: ArtifactKind) -> Result<&'static FragmentDef, DomainError> {
    lookup(kind, FragmentRole::Base, BASE_VARIANT)
}

pub fn default_variant(kind: ArtifactKind, role: FragmentRole) -> Option<VariantName> {
    FRAGMENT_CATALOG
        .iter()
        .find(|d| d.kind == kind && d.role == role && d.is_default)
        .and_then(|d| VariantName::new(d.variant).ok())
}

pub fn declared_variants(
    kind: ArtifactKind,
    role: FragmentRole,
) -> impl Iterator<Item = &'static str> {
    FRAGMENT_CATALOG
        .iter()
        .filter(move |d| d.kind == kind && d.role == role)
        .map(|d| d.variant)
}

/// Same as [`declared_variants`] but keyed by display names, for error
/// suggestions built from already-stringified fields.
pub fn declared_variants_by_name(kind: &str, role: &str) -> Vec<&'static str> {
    FRAGMENT_CATALOG
        .iter()
        .filter(|d| d.kind.as_str() == kind && d.role.as_str() == role)
        .map(|d| d.variant)
        .collect()
}

/// Every `(kind, constructor, method)` combination the catalog declares.
pub fn declared_combinations() -> Vec<(ArtifactKind, &'static str, &'static str)> {
    let mut out = Vec::new();
    for kind in [ArtifactKind::Controller, ArtifactKind::Service] {
        for ctor in declared_variants(kind, FragmentRole::Constructor) {
            for method in declared_variants(kind, FragmentRole::Method) {
                out.push((kind, ctor, method));
            }
        }
    }
    out
}

// ── FragmentKey ──────────────────────────────────────────────────────────────

/// Identifies a fragment file inside the template root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentKey {
    pub kind: ArtifactKind,
    pub role: FragmentRole,
    pub variant: String,
}

impl FragmentKey {
    /// Location relative to the template root.
    ///
    /// ```text
    /// backend/controller/controller.ts.tpl
    /// backend/controller/constructors/byRole.tpl
    /// backend/service/methods/front.tpl
    /// ```
    pub fn relative_path(&self) -> PathBuf {
        let dir = PathBuf::from("backend").join(self.kind.as_str());
        match self.role {
            FragmentRole::Base => dir.join(format!("{}.ts.tpl", self.kind.as_str())),
            FragmentRole::Constructor => dir.join("constructors").join(format!("{}.tpl", self.variant)),
            FragmentRole::Method => dir.join("methods").join(format!("{}.tpl", self.variant)),
        }
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.role, self.variant)
    }
}
