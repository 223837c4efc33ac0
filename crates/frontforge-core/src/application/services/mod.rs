//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "create a controller" or "build every front".

pub mod build_service;
pub mod composer;
pub mod generation;
pub mod project;
pub mod proxy_service;
pub mod registry_store;
pub mod router_maintainer;

pub use build_service::{BuildEvent, BuildReport, BuildService};
pub use composer::{ArtifactComposer, ConflictPolicy, GeneratedArtifact};
pub use generation::{
    FrontendOptions, GenerationReport, GenerationRun, GenerationService, GenerationSettings,
};
pub use project::{InitOptions, InitReport, ProjectService};
pub use proxy_service::{ProxyReport, ProxyService};
pub use registry_store::{LoadedRegistry, RegistryStore, UpsertReport};
pub use router_maintainer::{RouterMaintainer, RouterOutcome};
