//! Application layer for frontforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (generation, build, proxy, init)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; naming, substitution,
//! path and registry rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    ArtifactComposer, BuildEvent, BuildReport, BuildService, FrontendOptions, GenerationReport,
    GenerationService, GenerationSettings, InitOptions, InitReport, ProjectService, ProxyReport,
    ProxyService, RegistryStore, RouterOutcome,
};

pub use ports::{CommandSpec, Filesystem, FragmentLibrary, ProcessRunner};

pub use error::ApplicationError;
