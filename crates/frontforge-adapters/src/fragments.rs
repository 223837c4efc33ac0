//! Fragment library backed by a template directory.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── backend/
//! │   ├── controller/
//! │   │   ├── controller.ts.tpl
//! │   │   ├── constructors/{byRole,byFeature}.tpl
//! │   │   └── methods/front.tpl
//! │   └── service/
//! │       ├── service.ts.tpl
//! │       ├── constructors/default.tpl
//! │       └── methods/front.tpl
//! ├── frontend/               ← copied into every new front
//! └── docker/default.conf.tpl
//! ```

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, instrument};

use frontforge_core::{
    application::{ApplicationError, ports::FragmentLibrary},
    domain::FragmentKey,
    error::ForgeResult,
};

/// Reads fragments from `<root>/<key.relative_path()>`, caching each file
/// after its first successful read.
#[derive(Debug)]
pub struct DirectoryFragmentLibrary {
    root: PathBuf,
    cache: RwLock<HashMap<FragmentKey, String>>,
}

impl DirectoryFragmentLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn cached(&self, key: &FragmentKey) -> Option<String> {
        self.cache.read().ok()?.get(key).cloned()
    }
}

impl FragmentLibrary for DirectoryFragmentLibrary {
    #[instrument(skip(self), fields(key = %key))]
    fn load(&self, key: &FragmentKey) -> ForgeResult<String> {
        if let Some(text) = self.cached(key) {
            return Ok(text);
        }

        let path = self.locate(key);
        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::TemplateNotFound {
                key: key.to_string(),
                path: path.clone(),
            },
            _ => ApplicationError::filesystem(&path, e),
        })?;
        debug!(path = %path.display(), "Fragment loaded");

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.clone(), text.clone());
        }
        Ok(text)
    }

    fn locate(&self, key: &FragmentKey) -> PathBuf {
        self.root.join(key.relative_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontforge_core::domain::{ArtifactKind, FragmentRole};
    use frontforge_core::error::ForgeError;

    fn key(role: FragmentRole, variant: &str) -> FragmentKey {
        FragmentKey {
            kind: ArtifactKind::Service,
            role,
            variant: variant.into(),
        }
    }

    #[test]
    fn loads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backend/service/methods/front.tpl");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "m1").unwrap();

        let lib = DirectoryFragmentLibrary::new(dir.path());
        let k = key(FragmentRole::Method, "front");
        assert_eq!(lib.load(&k).unwrap(), "m1");

        fs::write(&path, "m2").unwrap();
        assert_eq!(lib.load(&k).unwrap(), "m1");
    }

    #[test]
    fn missing_fragment_is_template_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let lib = DirectoryFragmentLibrary::new(dir.path());

        let err = lib.load(&key(FragmentRole::Constructor, "default")).unwrap_err();

        match err {
            ForgeError::Application(ApplicationError::TemplateNotFound { key, path }) => {
                assert_eq!(key, "service/constructor/default");
                assert!(path.ends_with("backend/service/constructors/default.tpl"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
