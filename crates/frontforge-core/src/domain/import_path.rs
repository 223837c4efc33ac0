//! Relative module specifiers between two locations in a project tree.
//!
//! Resolution is purely lexical: `.` and `..` are folded without touching the
//! filesystem, separators are emitted as `/` on every platform, and a known
//! source extension on the target is dropped.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// Extensions stripped from the target module.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// A posix-style relative module reference such as `../../services/x.service`.
///
/// Always starts with `./` or `../`, except for the bare `.` produced when the
/// target is the directory itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSpecifier(String);

impl ModuleSpecifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Join this specifier onto `from_dir` and normalize the result.
    pub fn resolve_against(&self, from_dir: &Path) -> PathBuf {
        let mut joined = from_dir.to_path_buf();
        for segment in self.0.split('/') {
            joined.push(segment);
        }
        normalize(&joined).to_path_buf()
    }
}

impl fmt::Display for ModuleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the specifier that reaches `to_module` from inside `from_dir`.
///
/// Both paths must be absolute, or both relative to the same base.
pub fn resolve(from_dir: &Path, to_module: &Path) -> Result<ModuleSpecifier, DomainError> {
    let from = Normalized::new(from_dir);
    let to = Normalized::new(to_module);

    if from.root != to.root {
        return Err(DomainError::InvalidPath {
            path: to_module.display().to_string(),
            reason: format!(
                "cannot relate it to '{}': paths have different roots",
                from_dir.display()
            ),
        });
    }

    let common = from
        .segments
        .iter()
        .zip(&to.segments)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = &from.segments[common..];
    if ups.iter().any(|s| s == "..") {
        return Err(DomainError::InvalidPath {
            path: from_dir.display().to_string(),
            reason: "climbs above its base".into(),
        });
    }

    let mut parts: Vec<String> = vec!["..".to_string(); ups.len()];
    parts.extend(to.segments[common..].iter().cloned());

    if let Some(last) = parts.last_mut().filter(|_| to.segments.len() > common) {
        strip_source_extension(last);
    }

    let spec = match parts.first().map(String::as_str) {
        None => ".".to_string(),
        Some("..") => parts.join("/"),
        Some(_) => format!("./{}", parts.join("/")),
    };
    Ok(ModuleSpecifier(spec))
}

fn strip_source_extension(segment: &mut String) {
    if let Some((stem, ext)) = segment.rsplit_once('.')
        && !stem.is_empty()
        && SOURCE_EXTENSIONS.contains(&ext)
    {
        segment.truncate(stem.len());
    }
}

/// Root marker plus folded segments.
struct Normalized {
    root: Option<String>,
    segments: Vec<String>,
}

impl Normalized {
    fn new(path: &Path) -> Self {
        let mut root: Option<String> = None;
        let mut segments: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::Prefix(p) => {
                    root = Some(p.as_os_str().to_string_lossy().into_owned());
                }
                Component::RootDir => {
                    root.get_or_insert_with(|| "/".to_string());
                }
                Component::CurDir => {}
                Component::ParentDir => match segments.last() {
                    Some(last) if last != ".." => {
                        segments.pop();
                    }
                    // `..` at an absolute root stays at the root
                    _ if root.is_some() => {}
                    _ => segments.push("..".to_string()),
                },
                Component::Normal(s) => segments.push(s.to_string_lossy().into_owned()),
            }
        }
        Self { root, segments }
    }
}

/// Lexically normalize a path.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                let ends_with_parent =
                    matches!(out.components().next_back(), Some(Component::ParentDir));
                if at_root && out.has_root() {
                    continue;
                }
                if at_root || ends_with_parent {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Render a path with `/` separators.
pub fn to_posix(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => {
                if !out.ends_with('/') {
                    out.push('/');
                }
            }
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}
