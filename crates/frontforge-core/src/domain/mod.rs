//! Core domain layer for frontforge.
//!
//! Pure logic only: naming, the fragment catalog, placeholder substitution,
//! import-path resolution, registry upsert, router planning and proxy
//! config derivation. All I/O goes through the ports in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Immutable values**: All domain objects are Clone + PartialEq

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod frontend;
pub mod import_path;
pub mod layout;
pub mod naming;
pub mod nginx;
pub mod placeholder;
pub mod project_config;
pub mod registry;
pub mod router;
pub mod value_objects;

pub use catalog::{FRAGMENT_CATALOG, FragmentDef, FragmentKey};
pub use descriptor::FeatureDescriptor;
pub use error::{DomainError, ErrorCategory};
pub use frontend::FrontPlacement;
pub use import_path::ModuleSpecifier;
pub use layout::RuntimeLayout;
pub use naming::{DomainPath, FeatureName};
pub use nginx::{LocationBlock, ProxySettings};
pub use placeholder::PlaceholderValues;
pub use project_config::ProjectConfig;
pub use registry::{ArtifactEntry, FrontEntry, RegistryKind, RegistryRecord, UpsertOutcome};
pub use router::{RouteSpec, RouterPlan};
pub use value_objects::{ArtifactKind, BackendFlavor, FragmentRole, VariantName};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn artifact_kind_parses_aliases() {
        assert_eq!(ArtifactKind::from_str("Controller").unwrap(), ArtifactKind::Controller);
        assert_eq!(ArtifactKind::from_str("front").unwrap(), ArtifactKind::Frontend);
        assert!(ArtifactKind::from_str("model").is_err());
    }

    #[test]
    fn backend_flavor_from_config_value() {
        assert_eq!(BackendFlavor::from("Express"), BackendFlavor::Express);
        assert_eq!(BackendFlavor::from(""), BackendFlavor::None);
        assert!(BackendFlavor::Express.generates_stubs());
    }

    #[test]
    fn variant_names_are_file_stem_safe() {
        assert!(VariantName::new("byRole").is_ok());
        assert!(VariantName::new("../x").is_err());
        assert!(VariantName::new("").is_err());
    }

    #[test]
    fn errors_carry_categories() {
        let err = DomainError::UnknownVariant {
            kind: "controller".into(),
            role: "constructor".into(),
            variant: "x".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("byRole")));
    }
}
