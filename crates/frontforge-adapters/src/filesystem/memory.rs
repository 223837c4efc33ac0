//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use frontforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::ForgeResult,
};

/// In-memory filesystem for testing.
///
/// Paths are stored lexically normalized so `a/./b` and `a/b` name the same
/// file. `with_lock` serializes callers on one process-wide mutex.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
    lock: Arc<Mutex<()>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    locks_taken: usize,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn add_parent(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.add_dirs(parent);
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, creating its parents (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert_file(path, content);
        self
    }

    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = clean(path.as_ref());
        if let Ok(mut inner) = self.inner.write() {
            inner.add_parent(&path);
            inner.files.insert(path, content.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(&clean(path.as_ref())).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// How many times `with_lock` entered its critical section.
    pub fn locks_taken(&self) -> usize {
        self.inner.read().map(|i| i.locks_taken).unwrap_or_default()
    }

    fn read(&self, path: &Path) -> ForgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|e| poisoned(path, e.to_string()).into())
    }

    fn write(&self, path: &Path) -> ForgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|e| poisoned(path, e.to_string()).into())
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        let key = clean(path);
        self.read(path)?.files.get(&key).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        self.write(path)?.add_dirs(&clean(path));
        Ok(())
    }

    fn write_new(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let key = clean(path);
        let mut inner = self.write(path)?;
        if inner.files.contains_key(&key) || inner.directories.contains(&key) {
            return Err(ApplicationError::ArtifactConflict {
                path: path.to_path_buf(),
            }
            .into());
        }
        inner.add_parent(&key);
        inner.files.insert(key, content.to_string());
        Ok(())
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let key = clean(path);
        let mut inner = self.write(path)?;
        inner.add_parent(&key);
        inner.files.insert(key, content.to_string());
        Ok(())
    }

    fn with_lock(
        &self,
        path: &Path,
        critical: &mut dyn FnMut() -> ForgeResult<()>,
    ) -> ForgeResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| ApplicationError::StoreLockError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.write(path)?.locks_taken += 1;
        critical()
    }

    fn exists(&self, path: &Path) -> bool {
        let key = clean(path);
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(&key) || inner.directories.contains(&key))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let key = clean(path);
        self.inner
            .read()
            .map(|inner| inner.directories.contains(&key))
            .unwrap_or(false)
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> ForgeResult<usize> {
        let from = clean(from);
        let to = clean(to);
        let mut inner = self.write(&from)?;
        if !inner.directories.contains(&from) {
            return Err(ApplicationError::FilesystemError {
                path: from,
                reason: "No such directory".into(),
            }
            .into());
        }

        let copies: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(path, content)| {
                let relative = path.strip_prefix(&from).ok()?;
                Some((to.join(relative), content.clone()))
            })
            .collect();
        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|dir| dir.strip_prefix(&from).ok().map(|r| to.join(r)))
            .collect();

        for dir in dirs {
            inner.add_dirs(&dir);
        }
        let count = copies.len();
        for (path, content) in copies {
            inner.add_parent(&path);
            inner.files.insert(path, content);
        }
        Ok(count)
    }

    fn list_files(&self, dir: &Path) -> ForgeResult<Vec<PathBuf>> {
        let dir = clean(dir);
        let inner = self.read(&dir)?;
        if !inner.directories.contains(&dir) {
            return Err(ApplicationError::FilesystemError {
                path: dir,
                reason: "No such directory".into(),
            }
            .into());
        }
        Ok(inner
            .files
            .keys()
            .filter_map(|path| path.strip_prefix(&dir).ok().map(Path::to_path_buf))
            .collect())
    }
}

fn poisoned(path: &Path, reason: String) -> ApplicationError {
    ApplicationError::StoreLockError {
        path: path.to_path_buf(),
        reason,
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontforge_core::error::ForgeError;

    #[test]
    fn write_new_creates_parents_and_refuses_overwrite() {
        let fs = MemoryFilesystem::new();
        let path = Path::new("/p/src/admin/users.ts");

        fs.write_new(path, "x").unwrap();
        assert!(fs.is_dir(Path::new("/p/src/admin")));

        let err = fs.write_new(path, "y").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::ArtifactConflict { .. })
        ));
        assert_eq!(fs.read_file(path).as_deref(), Some("x"));
    }

    #[test]
    fn dot_segments_name_the_same_file() {
        let fs = MemoryFilesystem::new().with_file("/p/a/b.txt", "1");
        assert!(fs.exists(Path::new("/p/a/./c/../b.txt")));
    }

    #[test]
    fn copy_dir_all_copies_only_the_subtree() {
        let fs = MemoryFilesystem::new()
            .with_file("/t/frontend/vite.config.ts", "v")
            .with_file("/t/frontend/src/main.tsx", "m")
            .with_file("/t/docker/default.conf.tpl", "d");

        let n = fs
            .copy_dir_all(Path::new("/t/frontend"), Path::new("/p/fronts/x"))
            .unwrap();

        assert_eq!(n, 2);
        assert_eq!(fs.read_file("/p/fronts/x/src/main.tsx").as_deref(), Some("m"));
        assert!(!fs.exists(Path::new("/p/fronts/x/default.conf.tpl")));
    }

    #[test]
    fn list_files_is_relative_to_the_directory() {
        let fs = MemoryFilesystem::new()
            .with_file("/t/backend-init/src/index.ts", "i")
            .with_file("/t/backend-init/_env", "e")
            .with_file("/t/frontend/vite.config.ts", "v");

        let files = Filesystem::list_files(&fs, Path::new("/t/backend-init")).unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("_env"), PathBuf::from("src/index.ts")]
        );
        assert!(Filesystem::list_files(&fs, Path::new("/t/absent")).is_err());
    }

    #[test]
    fn with_lock_counts_entries() {
        let fs = MemoryFilesystem::new();
        fs.with_lock(Path::new("/p/r.json"), &mut || Ok(())).unwrap();
        fs.with_lock(Path::new("/p/r.json"), &mut || Ok(())).unwrap();
        assert_eq!(fs.locks_taken(), 2);
    }
}
