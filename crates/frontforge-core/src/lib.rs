//! frontforge core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the frontforge
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          frontforge-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, BuildService, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Filesystem, FragmentLibrary, Process)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     frontforge-adapters (Infra)         │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (naming, catalog, placeholders, paths,  │
//! │  registries, routers, nginx)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frontforge_core::prelude::*;
//!
//! let layout = RuntimeLayout::new("/work/app", "/opt/frontforge/templates");
//! let service = GenerationService::new(fs, fragments, runner, GenerationSettings::default());
//! let descriptor = FeatureDescriptor::parse(ArtifactKind::Controller, "admin/reports/summary")?;
//! let report = service.create_controller(&layout, &descriptor)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildService, GenerationService, GenerationSettings, ProjectService, ProxyService,
        ports::{CommandSpec, Filesystem, FragmentLibrary, ProcessRunner},
    };
    pub use crate::domain::{
        ArtifactKind, BackendFlavor, FeatureDescriptor, FrontEntry, ProxySettings, RuntimeLayout,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
