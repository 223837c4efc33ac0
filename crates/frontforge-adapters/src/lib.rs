//! Infrastructure adapters for frontforge.
//!
//! This crate implements the ports defined in `frontforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod fragments;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use fragments::DirectoryFragmentLibrary;
pub use process::SystemProcessRunner;
