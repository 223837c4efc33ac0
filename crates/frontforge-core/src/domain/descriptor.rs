//! The `FeatureDescriptor`: one validated generation request.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers.

use std::fmt;

use crate::domain::catalog;
use crate::domain::error::DomainError;
use crate::domain::naming::{DomainPath, FeatureName, split_feature_path};
use crate::domain::value_objects::{ArtifactKind, FragmentRole, VariantName};

/// A fully validated request to generate one artifact.
///
/// For backend kinds both variants are guaranteed to be declared in the
/// fragment catalog. Frontend descriptors carry no variants; the stubs they
/// spawn are derived with [`FeatureDescriptor::for_kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    domain: DomainPath,
    feature: FeatureName,
    kind: ArtifactKind,
    constructor_variant: Option<VariantName>,
    method_variant: Option<VariantName>,
}

impl FeatureDescriptor {
    /// Descriptor with the catalog's default variants.
    pub fn new(kind: ArtifactKind, domain: DomainPath, feature: FeatureName) -> Self {
        let (constructor_variant, method_variant) = if kind.is_backend() {
            (
                catalog::default_variant(kind, FragmentRole::Constructor),
                catalog::default_variant(kind, FragmentRole::Method),
            )
        } else {
            (None, None)
        };
        Self {
            domain,
            feature,
            kind,
            constructor_variant,
            method_variant,
        }
    }

    /// Parse `<domain>/<feature>`.
    pub fn parse(kind: ArtifactKind, path: &str) -> Result<Self, DomainError> {
        let (domain, feature) = split_feature_path(path)?;
        Ok(Self::new(kind, domain, feature))
    }

    pub fn with_constructor(self, variant: &str) -> Result<Self, DomainError> {
        let variant = self.checked_variant(FragmentRole::Constructor, variant)?;
        Ok(Self {
            constructor_variant: Some(variant),
            ..self
        })
    }

    pub fn with_method(self, variant: &str) -> Result<Self, DomainError> {
        let variant = self.checked_variant(FragmentRole::Method, variant)?;
        Ok(Self {
            method_variant: Some(variant),
            ..self
        })
    }

    fn checked_variant(&self, role: FragmentRole, variant: &str) -> Result<VariantName, DomainError> {
        let name = VariantName::new(variant)?;
        catalog::lookup(self.kind, role, name.as_str())?;
        Ok(name)
    }

    /// The same feature as a different artifact kind, with that kind's defaults.
    pub fn for_kind(&self, kind: ArtifactKind) -> Self {
        Self::new(kind, self.domain.clone(), self.feature.clone())
    }

    pub fn domain(&self) -> &DomainPath {
        &self.domain
    }

    pub fn feature(&self) -> &FeatureName {
        &self.feature
    }

    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn constructor_variant(&self) -> Option<&VariantName> {
        self.constructor_variant.as_ref()
    }

    pub fn method_variant(&self) -> Option<&VariantName> {
        self.method_variant.as_ref()
    }
}

impl fmt::Display for FeatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.domain, self.feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_kind() {
        let d = FeatureDescriptor::parse(ArtifactKind::Controller, "admin/reports/summary").unwrap();
        assert_eq!(d.constructor_variant().unwrap().as_str(), "byRole");
        assert_eq!(d.method_variant().unwrap().as_str(), "front");

        let s = d.for_kind(ArtifactKind::Service);
        assert_eq!(s.constructor_variant().unwrap().as_str(), "default");
        assert_eq!(s.domain().as_str(), "admin/reports");

        let f = d.for_kind(ArtifactKind::Frontend);
        assert!(f.constructor_variant().is_none());
    }

    #[test]
    fn variants_are_checked_against_the_kind() {
        let d = FeatureDescriptor::parse(ArtifactKind::Controller, "admin/summary").unwrap();
        let d = d.with_constructor("byFeature").unwrap();
        assert_eq!(d.constructor_variant().unwrap().as_str(), "byFeature");

        let s = FeatureDescriptor::parse(ArtifactKind::Service, "admin/summary").unwrap();
        assert!(matches!(
            s.with_constructor("byRole"),
            Err(DomainError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn frontend_rejects_variants() {
        let f = FeatureDescriptor::parse(ArtifactKind::Frontend, "admin/summary").unwrap();
        assert!(f.with_method("front").is_err());
    }

    #[test]
    fn display() {
        let d = FeatureDescriptor::parse(ArtifactKind::Service, "admin/user-list").unwrap();
        assert_eq!(d.to_string(), "service admin/userList");
    }
}
