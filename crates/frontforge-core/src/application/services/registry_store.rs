//! Registry Store - locked, atomic read-modify-write of JSON registries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        RegistryRecord, UpsertOutcome,
        registry::{decode_entries, parse_registry, serialize_registry, upsert_entry},
    },
    error::{Context, ForgeResult},
};

/// A registry as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRegistry<T> {
    pub entries: Vec<T>,
    /// Problems that were recovered from (unusable file, foreign rows).
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertReport {
    pub path: PathBuf,
    pub outcome: UpsertOutcome,
    pub warnings: Vec<String>,
}

pub struct RegistryStore {
    filesystem: Arc<dyn Filesystem>,
}

impl RegistryStore {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Read the raw rows. An unusable file reads as empty, with a warning.
    pub fn load_raw(&self, path: &Path) -> ForgeResult<(Vec<Value>, Option<String>)> {
        let text = self.read_optional(path)?;
        Ok(Self::parse(path, text.as_deref()))
    }

    fn read_optional(&self, path: &Path) -> ForgeResult<Option<String>> {
        if self.filesystem.exists(path) {
            Ok(Some(self.filesystem.read_to_string(path)?))
        } else {
            Ok(None)
        }
    }

    /// Missing, empty and malformed files all read as empty with a warning.
    fn parse(path: &Path, text: Option<&str>) -> (Vec<Value>, Option<String>) {
        let parsed = parse_registry(text);
        let warning = parsed.recovered.map(|reason| {
            let err = ApplicationError::RegistryCorrupt {
                path: path.to_path_buf(),
                reason,
            };
            warn!(path = %path.display(), "{err}; treating it as empty");
            err.to_string()
        });
        (parsed.entries, warning)
    }

    /// Read typed rows for a read-only consumer.
    pub fn load<T: RegistryRecord>(&self, path: &Path) -> ForgeResult<LoadedRegistry<T>> {
        let (raw, warning) = self.load_raw(path)?;
        let (entries, rejected) = decode_entries::<T>(&raw);

        let mut warnings: Vec<String> = warning.into_iter().collect();
        for index in rejected {
            let msg = format!("{}: skipping malformed entry #{}", path.display(), index + 1);
            warn!("{msg}");
            warnings.push(msg);
        }
        Ok(LoadedRegistry { entries, warnings })
    }

    /// Insert or replace `entry` by its key fields.
    ///
    /// The whole read-modify-write runs under the file's lock and the result
    /// is written atomically. Nothing is written when the bytes would not
    /// change.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn upsert<T: RegistryRecord>(&self, path: &Path, entry: &T) -> ForgeResult<UpsertReport> {
        let value = serde_json::to_value(entry).context("serializing registry entry")?;
        let mut report = None;

        self.filesystem.with_lock(path, &mut || {
            let current = self.read_optional(path)?;
            let (mut entries, warning) = Self::parse(path, current.as_deref());

            let outcome = upsert_entry(&mut entries, T::KEY_FIELDS, value.clone());
            let text = serialize_registry(&entries).context("serializing registry")?;

            if current.as_deref() != Some(text.as_str()) {
                self.filesystem.write_atomic(path, &text)?;
            }
            debug!(?outcome, entries = entries.len(), "Registry upserted");

            report = Some(UpsertReport {
                path: path.to_path_buf(),
                outcome,
                warnings: warning.into_iter().collect(),
            });
            Ok(())
        })?;

        report.ok_or_else(|| {
            crate::error::ForgeError::Internal {
                message: format!("lock on {} released without running", path.display()),
            }
        })
    }
}
