//! Placement and configuration of a frontend micro-app.
//!
//! A front for `admin/reports` + `summary` lives in
//! `fronts/admin/reports/summary`, is served under `/admin/reports/summary/`
//! and builds into `public/admin/reports/summary`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::descriptor::FeatureDescriptor;
use crate::domain::error::DomainError;
use crate::domain::import_path;
use crate::domain::registry::FrontEntry;

pub const BASE_PATH_TOKEN: &str = "__BASE_PATH__";
pub const OUT_DIR_TOKEN: &str = "__OUT_DIR__";

/// Directory the production builds land in, relative to the project root.
pub const PUBLIC_DIR: &str = "public";

pub const BUILD_DEV_SCRIPT: &str = "cross-env NODE_ENV=development vite build";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontPlacement {
    name: String,
    /// Path below the fronts root, e.g. `admin/reports/summary`.
    inner: String,
    fronts_root: String,
}

impl FrontPlacement {
    pub fn new(fronts_root: &str, descriptor: &FeatureDescriptor) -> Self {
        let name = descriptor.feature().camel().to_string();
        Self {
            inner: format!("{}/{}", descriptor.domain(), name),
            name,
            fronts_root: fronts_root.trim_matches('/').to_string(),
        }
    }

    /// Registry name of the front.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project-relative posix path, e.g. `fronts/admin/reports/summary`.
    pub fn project_full_path(&self) -> String {
        if self.fronts_root.is_empty() {
            self.inner.clone()
        } else {
            format!("{}/{}", self.fronts_root, self.inner)
        }
    }

    /// Project-relative directory of the front.
    pub fn project_dir(&self) -> PathBuf {
        self.project_full_path().split('/').collect()
    }

    /// Vite `base`: `/admin/reports/summary/`.
    pub fn base_path(&self) -> String {
        format!("/{}/", self.inner)
    }

    /// Vite `build.outDir`, relative to the front directory.
    pub fn out_dir(&self) -> Result<String, DomainError> {
        let public: PathBuf = std::iter::once(PUBLIC_DIR)
            .chain(self.inner.split('/'))
            .collect();
        let spec = import_path::resolve(&self.project_dir(), &public)?;
        Ok(spec.into_string())
    }

    pub fn registry_entry(&self, port: u16) -> FrontEntry {
        FrontEntry {
            name: self.name.clone(),
            project_full_path: self.project_full_path(),
            port,
        }
    }
}

/// Fill the base path and output directory tokens of `vite.config.ts`.
pub fn configure_vite(text: &str, placement: &FrontPlacement) -> Result<String, DomainError> {
    Ok(text
        .replace(BASE_PATH_TOKEN, &placement.base_path())
        .replace(OUT_DIR_TOKEN, &placement.out_dir()?))
}

/// Pin the dev-server port and add a `build:dev` script to `package.json`.
///
/// A `dev` script that already passes `--port` is left alone, as is an
/// existing `build:dev`.
pub fn update_package_json(file: &Path, text: &str, port: u16) -> Result<String, DomainError> {
    let malformed = |reason: String| DomainError::MalformedManifest {
        file: file.display().to_string(),
        reason,
    };

    let mut manifest: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| malformed("top level is not an object".into()))?;

    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    if !scripts.is_object() {
        *scripts = Value::Object(Map::new());
    }
    let Some(scripts) = scripts.as_object_mut() else {
        return Err(malformed("scripts is not an object".into()));
    };

    let dev = scripts.get("dev").and_then(Value::as_str).unwrap_or("vite");
    if !dev.contains("--port") {
        let pinned = format!("{dev} --port {port}");
        scripts.insert("dev".into(), Value::String(pinned));
    }
    if !scripts.contains_key("build:dev") {
        scripts.insert("build:dev".into(), Value::String(BUILD_DEV_SCRIPT.into()));
    }

    let mut out = serde_json::to_string_pretty(&manifest).map_err(|e| malformed(e.to_string()))?;
    out.push('\n');
    Ok(out)
}
