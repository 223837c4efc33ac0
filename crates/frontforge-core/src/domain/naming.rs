//! Feature and domain naming.
//!
//! A feature request arrives as `<domain>/<feature>`, e.g.
//! `admin/reports/summary`. The domain is a slash-separated grouping path and
//! the feature is its leaf identifier, available in several casings.

use std::fmt;
use std::path::PathBuf;

use crate::domain::error::DomainError;

// ── FeatureName ───────────────────────────────────────────────────────────────

/// A feature identifier with its derived casings.
///
/// | Input          | camel          | pascal         | kebab           |
/// |----------------|----------------|----------------|-----------------|
/// | `summary`      | `summary`      | `Summary`      | `summary`       |
/// | `test-front`   | `testFront`    | `TestFront`    | `test-front`    |
/// | `UserProfile`  | `userProfile`  | `UserProfile`  | `user-profile`  |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureName {
    camel: String,
    pascal: String,
    kebab: String,
}

impl FeatureName {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let invalid = |reason: &str| DomainError::InvalidFeature {
            name: raw.clone(),
            reason: reason.into(),
        };

        let Some(first) = raw.chars().next() else {
            return Err(invalid("name cannot be empty"));
        };
        if !first.is_ascii_alphabetic() {
            return Err(invalid("name must start with a letter"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("only letters, digits, '-' and '_' are allowed"));
        }

        Ok(Self {
            camel: to_camel_case(&raw),
            pascal: to_pascal_case(&raw),
            kebab: to_kebab_case(&raw),
        })
    }

    pub fn camel(&self) -> &str {
        &self.camel
    }

    pub fn pascal(&self) -> &str {
        &self.pascal
    }

    pub fn kebab(&self) -> &str {
        &self.kebab
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.camel)
    }
}

// ── DomainPath ────────────────────────────────────────────────────────────────

/// Slash-separated logical grouping path, e.g. `admin/reports`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainPath(String);

impl DomainPath {
    pub fn new(domain: impl Into<String>) -> Result<Self, DomainError> {
        let domain = domain.into();
        let trimmed = domain.trim_matches('/');
        let invalid = |reason: &str| DomainError::InvalidDomain {
            domain: domain.clone(),
            reason: reason.into(),
        };

        if trimmed.is_empty() {
            return Err(invalid("domain cannot be empty"));
        }
        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("relative segments are not allowed"));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(invalid("only letters, digits, '-' and '_' are allowed"));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The last segment; names the router file and the session role.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The domain as a relative filesystem path.
    pub fn to_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for DomainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split `admin/reports/summary` into (`admin/reports`, `summary`).
pub fn split_feature_path(input: &str) -> Result<(DomainPath, FeatureName), DomainError> {
    let trimmed = input.trim().trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((domain, feature)) => Ok((DomainPath::new(domain)?, FeatureName::new(feature)?)),
        None => Err(DomainError::InvalidDomain {
            domain: input.to_string(),
            reason: "expected <domain>/<feature>".into(),
        }),
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    let mut out = words.next().unwrap_or_default();
    for w in words {
        out.push_str(&capitalize(&w));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words on separators and case transitions.
///
/// 1. `_`, `-`, whitespace always split
/// 2. `aB` splits between `a` and `B`
/// 3. `HTTPServer` splits between `P` and `S` (Upper Upper Lower)
/// 4. a digit followed by a letter splits (`v2Api` → `v2`, `api`)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            let camel_break = (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase();
            let acronym_break = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase());
            if camel_break || acronym_break {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_casings() {
        let f = FeatureName::new("summary").unwrap();
        assert_eq!(f.camel(), "summary");
        assert_eq!(f.pascal(), "Summary");
        assert_eq!(f.kebab(), "summary");

        let f = FeatureName::new("test-frontend").unwrap();
        assert_eq!(f.camel(), "testFrontend");
        assert_eq!(f.pascal(), "TestFrontend");
        assert_eq!(f.kebab(), "test-frontend");

        let f = FeatureName::new("userProfile").unwrap();
        assert_eq!(f.kebab(), "user-profile");
        assert_eq!(f.pascal(), "UserProfile");
    }

    #[test]
    fn acronyms_split_once() {
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
        assert_eq!(to_camel_case("HTTPServer"), "httpServer");
    }

    #[test]
    fn feature_rejects_bad_input() {
        assert!(FeatureName::new("").is_err());
        assert!(FeatureName::new("1abc").is_err());
        assert!(FeatureName::new("a.b").is_err());
        assert!(FeatureName::new("a/b").is_err());
    }

    #[test]
    fn domain_last_segment_and_path() {
        let d = DomainPath::new("admin/reports").unwrap();
        assert_eq!(d.last_segment(), "reports");
        assert_eq!(d.to_path(), PathBuf::from("admin").join("reports"));
        assert_eq!(DomainPath::new("/admin/").unwrap().as_str(), "admin");
    }

    #[test]
    fn domain_rejects_traversal() {
        assert!(DomainPath::new("admin/../etc").is_err());
        assert!(DomainPath::new("admin//x").is_err());
        assert!(DomainPath::new("").is_err());
    }

    #[test]
    fn split_feature_path_takes_leaf() {
        let (d, f) = split_feature_path("admin/reports/summary").unwrap();
        assert_eq!(d.as_str(), "admin/reports");
        assert_eq!(f.camel(), "summary");
        assert!(split_feature_path("summary").is_err());
    }
}
