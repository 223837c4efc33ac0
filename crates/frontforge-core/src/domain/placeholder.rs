//! `${Name}` placeholder substitution.
//!
//! Substitution is total over a declared set: every declared token must have
//! a value, and no undeclared identifier-shaped token may survive. Values are
//! inserted verbatim and never re-scanned, so a composed block containing
//! `${...}` text cannot trigger a second expansion.
//!
//! `$${` emits a literal `${`, which lets templates carry JavaScript template
//! literals such as `$${user.name}`.

use std::collections::HashMap;

use crate::domain::error::DomainError;

/// Values available to a substitution.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderValues {
    values: HashMap<&'static str, String>,
}

impl PlaceholderValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A `${Identifier}` occurrence found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    end: usize,
    name: &'a str,
}

/// Substitute every declared placeholder in `text`.
///
/// `template` names the source in error messages.
pub fn substitute(
    template: &str,
    text: &str,
    declared: &[&str],
    values: &PlaceholderValues,
) -> Result<String, DomainError> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('$') {
        let at = cursor + offset;
        out.push_str(&text[cursor..at]);

        if text[at..].starts_with("$${") {
            out.push_str("${");
            cursor = at + 3;
            continue;
        }

        match token_at(text, at) {
            Some(token) if declared.contains(&token.name) => {
                let value = values.get(token.name).ok_or_else(|| {
                    DomainError::MissingPlaceholderValue {
                        template: template.to_string(),
                        placeholder: token.name.to_string(),
                    }
                })?;
                out.push_str(value);
                cursor = token.end;
            }
            Some(token) => {
                return Err(DomainError::ResidualPlaceholder {
                    template: template.to_string(),
                    placeholder: token.name.to_string(),
                });
            }
            None => {
                out.push('$');
                cursor = at + 1;
            }
        }
    }

    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Names of all `${Identifier}` tokens in `text`, in order of appearance.
pub fn placeholders_in(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find('$') {
        let at = cursor + offset;
        if text[at..].starts_with("$${") {
            cursor = at + 3;
            continue;
        }
        match token_at(text, at) {
            Some(token) => {
                found.push(token.name);
                cursor = token.end;
            }
            None => cursor = at + 1,
        }
    }
    found
}

/// Parse `${Identifier}` starting at byte `at` (which must hold `$`).
fn token_at(text: &str, at: usize) -> Option<Token<'_>> {
    let rest = text.get(at..)?.strip_prefix("${")?;
    let close = rest.find('}')?;
    let name = &rest[..close];
    if !is_identifier(name) {
        return None;
    }
    Some(Token {
        end: at + 2 + close + 1,
        name,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> PlaceholderValues {
        PlaceholderValues::new()
            .with("FeatureCamel", "summary")
            .with("Block", "x = ${Unresolved};")
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = substitute(
            "t",
            "${FeatureCamel} and ${FeatureCamel}",
            &["FeatureCamel"],
            &values(),
        )
        .unwrap();
        assert_eq!(out, "summary and summary");
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = substitute("t", "${SessionRole}", &["SessionRole"], &values()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingPlaceholderValue {
                template: "t".into(),
                placeholder: "SessionRole".into(),
            }
        );
    }

    #[test]
    fn undeclared_token_is_residual() {
        let err = substitute("t", "a ${Other} b", &["FeatureCamel"], &values()).unwrap_err();
        assert!(matches!(err, DomainError::ResidualPlaceholder { placeholder, .. } if placeholder == "Other"));
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let out = substitute("t", "{ ${Block} }", &["Block"], &values()).unwrap();
        assert_eq!(out, "{ x = ${Unresolved}; }");
    }

    #[test]
    fn escaped_and_non_identifier_dollars_pass_through() {
        let out = substitute(
            "t",
            "`$${user.name}` costs $5 and ${ a + b }",
            &[],
            &values(),
        )
        .unwrap();
        assert_eq!(out, "`${user.name}` costs $5 and ${ a + b }");
    }

    #[test]
    fn lists_tokens_in_order() {
        assert_eq!(
            placeholders_in("${A} $${B} ${C_1} ${1x} $"),
            vec!["A", "C_1"]
        );
    }
}
