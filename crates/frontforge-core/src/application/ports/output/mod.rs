//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `frontforge-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::FragmentKey;
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `frontforge_adapters::filesystem::LocalFilesystem` (production)
/// - `frontforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> ForgeResult<String>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Create `path` with `content`, creating parent directories.
    ///
    /// Fails with `ApplicationError::ArtifactConflict` when the file exists;
    /// the existence check and the creation are one operation.
    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Replace `path` with `content` via a temporary sibling and a rename,
    /// creating parent directories. Readers see either the old or the new
    /// content, never a prefix.
    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Run `critical` while holding an exclusive lock associated with
    /// `path` (a sidecar `<path>.lock` on disk).
    fn with_lock(
        &self,
        path: &Path,
        critical: &mut dyn FnMut() -> ForgeResult<()>,
    ) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Copy every file under `from` into `to`, overwriting. Returns the
    /// number of files copied.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<usize>;

    /// Every file under `dir`, relative to it, sorted.
    fn list_files(&self, dir: &Path) -> ForgeResult<Vec<PathBuf>>;
}

/// Port for template fragment lookup.
///
/// Implemented by `frontforge_adapters::fragments::DirectoryFragmentLibrary`.
pub trait FragmentLibrary: Send + Sync {
    /// Raw fragment text. Fails with `ApplicationError::TemplateNotFound`.
    fn load(&self, key: &FragmentKey) -> ForgeResult<String>;

    /// Where the fragment would be read from, for diagnostics.
    fn locate(&self, key: &FragmentKey) -> PathBuf;
}

/// An external command to run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// `npm` with the given arguments.
    pub fn npm<I, S>(cwd: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("npm", cwd).args(args)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for spawning external processes.
///
/// Implementations pass the child's output through to the user's terminal
/// and treat a non-zero exit as `ApplicationError::ProcessExecutionFailure`.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> ForgeResult<()>;
}
