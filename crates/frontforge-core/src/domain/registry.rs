//! JSON registries kept under `.frontforge/`.
//!
//! A registry is a JSON array of objects, unique by a set of key fields.
//! Upserting replaces the first entry with equal keys in place and appends
//! otherwise; entries are never deleted. Everything here is pure: reading
//! and writing the file (with locking) is the job of
//! [`RegistryStore`](crate::application::services::RegistryStore).

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Registry kinds ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Fronts,
    Controllers,
    Services,
}

impl RegistryKind {
    /// Location relative to the project root.
    pub fn relative_path(self) -> PathBuf {
        let dir = PathBuf::from(".frontforge");
        match self {
            Self::Fronts => dir.join("frontForgeFronts.json"),
            Self::Controllers => dir.join("express").join("controllers.json"),
            Self::Services => dir.join("express").join("services.json"),
        }
    }

    pub fn key_fields(self) -> &'static [&'static str] {
        match self {
            Self::Fronts => FrontEntry::KEY_FIELDS,
            Self::Controllers | Self::Services => ArtifactEntry::KEY_FIELDS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fronts => "fronts",
            Self::Controllers => "controllers",
            Self::Services => "services",
        }
    }
}

/// A typed registry row.
pub trait RegistryRecord: Serialize + DeserializeOwned {
    const KEY_FIELDS: &'static [&'static str];
}

/// One registered frontend micro-app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontEntry {
    pub name: String,
    /// Project-relative posix path, e.g. `fronts/admin/reports/summary`.
    pub project_full_path: String,
    pub port: u16,
}

impl RegistryRecord for FrontEntry {
    const KEY_FIELDS: &'static [&'static str] = &["name"];
}

/// One generated controller or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub domain: String,
    pub feature: String,
    /// Absolute posix path of the generated file.
    pub path: String,
}

impl RegistryRecord for ArtifactEntry {
    const KEY_FIELDS: &'static [&'static str] = &["domain", "feature"];
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Result of reading a registry file's text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRegistry {
    pub entries: Vec<Value>,
    /// Set when the text was unusable and an empty registry was substituted.
    pub recovered: Option<String>,
}

/// Parse registry text. Missing, empty, unparsable or non-array content
/// yields an empty registry with a recovery note.
pub fn parse_registry(text: Option<&str>) -> ParsedRegistry {
    let Some(text) = text else {
        return ParsedRegistry {
            entries: Vec::new(),
            recovered: Some("file does not exist".into()),
        };
    };
    if text.trim().is_empty() {
        return ParsedRegistry {
            entries: Vec::new(),
            recovered: Some("file is empty".into()),
        };
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(entries)) => ParsedRegistry {
            entries,
            recovered: None,
        },
        Ok(other) => ParsedRegistry {
            entries: Vec::new(),
            recovered: Some(format!("expected a JSON array, found {}", json_type(&other))),
        },
        Err(e) => ParsedRegistry {
            entries: Vec::new(),
            recovered: Some(format!("invalid JSON: {e}")),
        },
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Pretty JSON, two-space indent, trailing newline.
pub fn serialize_registry(entries: &[Value]) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(entries)?;
    text.push('\n');
    Ok(text)
}

/// Decode typed rows, returning the indexes of rows that did not fit `T`.
pub fn decode_entries<T: RegistryRecord>(entries: &[Value]) -> (Vec<T>, Vec<usize>) {
    let mut rows = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (i, value) in entries.iter().enumerate() {
        match T::deserialize(value) {
            Ok(row) => rows.push(row),
            Err(_) => rejected.push(i),
        }
    }
    (rows, rejected)
}

// ── Upsert ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
    /// An entry with equal keys and identical content already existed.
    Unchanged,
}

/// Insert or replace `entry` by its key fields.
pub fn upsert_entry(entries: &mut Vec<Value>, key_fields: &[&str], entry: Value) -> UpsertOutcome {
    let same_keys =
        |existing: &Value| key_fields.iter().all(|k| existing.get(*k) == entry.get(*k));

    match entries.iter().position(same_keys) {
        Some(i) if entries[i] == entry => UpsertOutcome::Unchanged,
        Some(i) => {
            entries[i] = entry;
            UpsertOutcome::Replaced
        }
        None => {
            entries.push(entry);
            UpsertOutcome::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn front(name: &str, path: &str, port: u16) -> Value {
        serde_json::to_value(FrontEntry {
            name: name.into(),
            project_full_path: path.into(),
            port,
        })
        .unwrap()
    }

    #[test]
    fn front_entry_uses_camel_case_field_names() {
        let v = front("alpha", "fronts/a/alpha", 5173);
        assert_eq!(
            v,
            json!({"name": "alpha", "projectFullPath": "fronts/a/alpha", "port": 5173})
        );
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut entries = vec![front("alpha", "p1", 1), front("beta", "p2", 2)];
        let outcome = upsert_entry(&mut entries, FrontEntry::KEY_FIELDS, front("alpha", "p3", 3));
        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["projectFullPath"], "p3");
        assert_eq!(entries[1]["name"], "beta");
    }

    #[test]
    fn upsert_appends_new_keys() {
        let mut entries = vec![json!({"domain": "admin", "feature": "a", "path": "/x"})];
        let outcome = upsert_entry(
            &mut entries,
            ArtifactEntry::KEY_FIELDS,
            json!({"domain": "admin/reports", "feature": "a", "path": "/y"}),
        );
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn repeat_upsert_is_byte_stable() {
        let mut entries = Vec::new();
        upsert_entry(&mut entries, FrontEntry::KEY_FIELDS, front("alpha", "p", 1));
        let first = serialize_registry(&entries).unwrap();
        let outcome = upsert_entry(&mut entries, FrontEntry::KEY_FIELDS, front("alpha", "p", 1));
        assert_eq!(outcome, UpsertOutcome::Unchanged);
        assert_eq!(serialize_registry(&entries).unwrap(), first);
        assert!(first.ends_with("}\n]\n"));
        assert!(first.contains("\n  {\n    \"name\""));
    }

    #[test]
    fn unusable_text_recovers_to_empty() {
        for text in [None, Some(""), Some("  \n"), Some("{}"), Some("[1,"), Some("null")] {
            let parsed = parse_registry(text);
            assert!(parsed.entries.is_empty());
            assert!(parsed.recovered.is_some(), "{text:?}");
        }
        let parsed = parse_registry(Some("[]"));
        assert!(parsed.recovered.is_none());
    }

    #[test]
    fn decode_skips_foreign_rows() {
        let entries = vec![front("a", "p", 1), json!({"name": 3})];
        let (rows, rejected): (Vec<FrontEntry>, _) = decode_entries(&entries);
        assert_eq!(rows.len(), 1);
        assert_eq!(rejected, vec![1]);
    }

    #[test]
    fn registry_locations() {
        assert_eq!(
            RegistryKind::Controllers.relative_path(),
            PathBuf::from(".frontforge/express/controllers.json")
        );
        assert_eq!(RegistryKind::Fronts.key_fields(), &["name"]);
    }
}
