//! Local filesystem adapter using std::fs.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};
use walkdir::WalkDir;

use frontforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ForgeError, ForgeResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Locks are advisory `flock`-style locks on a sidecar `<file>.lock`; the
/// sidecar is left in place after use.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

/// `<path>.lock`
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()> {
        ensure_parent(path)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => ApplicationError::ArtifactConflict {
                    path: path.to_path_buf(),
                }
                .into(),
                _ => map_io_error(path, e, "create file"),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        trace!(path = %path.display(), bytes = content.len(), "File created");
        Ok(())
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let parent = ensure_parent(path)?;
        let mut tmp = NamedTempFile::new_in(&parent)
            .map_err(|e| map_io_error(&parent, e, "create temporary file"))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| map_io_error(tmp.path(), e, "write temporary file"))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| map_io_error(tmp.path(), e, "flush temporary file"))?;
        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        trace!(path = %path.display(), bytes = content.len(), "File replaced");
        Ok(())
    }

    fn with_lock(
        &self,
        path: &Path,
        critical: &mut dyn FnMut() -> ForgeResult<()>,
    ) -> ForgeResult<()> {
        ensure_parent(path)?;
        let lock = lock_path(path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock)
            .map_err(|e| lock_error(&lock, e))?;

        file.lock().map_err(|e| lock_error(&lock, e))?;
        debug!(lock = %lock.display(), "Lock acquired");

        let result = critical();

        // closing the handle releases it too
        if let Err(e) = file.unlock() {
            debug!(lock = %lock.display(), error = %e, "Unlock failed");
        }
        result
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<usize> {
        let mut copied = 0;
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(from).to_path_buf();
                ForgeError::from(ApplicationError::filesystem(path, e))
            })?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| ApplicationError::filesystem(entry.path(), e))?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else {
                ensure_parent(&target)?;
                fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
                copied += 1;
            }
        }
        debug!(from = %from.display(), to = %to.display(), copied, "Directory copied");
        Ok(copied)
    }

    fn list_files(&self, dir: &Path) -> ForgeResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                ForgeError::from(ApplicationError::filesystem(path, e))
            })?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(dir)
                    .map_err(|e| ApplicationError::filesystem(entry.path(), e))?;
                files.push(relative.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

fn ensure_parent(path: &Path) -> ForgeResult<PathBuf> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| map_io_error(&parent, e, "create directory"))?;
    Ok(parent)
}

fn lock_error(path: &Path, e: io::Error) -> ForgeError {
    ApplicationError::StoreLockError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
