//! Reverse-proxy location blocks derived from the fronts registry.

use crate::domain::error::DomainError;
use crate::domain::registry::FrontEntry;

pub const LOCATIONS_TOKEN: &str = "##FRONTEND_LOCATIONS##";

/// Where fronts live in the project and where their builds are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Project directory holding the fronts, e.g. `fronts`.
    pub fronts_root: String,
    /// Directory inside the proxy container holding the built assets.
    pub static_root: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            fronts_root: "fronts".into(),
            static_root: "/usr/share/nginx/html".into(),
        }
    }
}

/// One `location` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationBlock {
    /// URL prefix without trailing slash, e.g. `/admin/reports`.
    pub url_base: String,
    /// Asset path under the static root, e.g. `admin/reports`.
    pub alias: String,
}

impl LocationBlock {
    pub fn from_front(front: &FrontEntry, settings: &ProxySettings) -> Self {
        let path = front.project_full_path.trim_matches('/');
        let root = settings.fronts_root.trim_matches('/');

        let inner = path
            .strip_prefix(root)
            .filter(|rest| !root.is_empty() && (rest.is_empty() || rest.starts_with('/')))
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(path);

        Self {
            url_base: format!("/{inner}"),
            alias: inner.to_string(),
        }
    }

    pub fn render(&self, static_root: &str) -> String {
        let static_root = static_root.trim_end_matches('/');
        let url = self.url_base.trim_end_matches('/');
        let alias = if self.alias.is_empty() {
            String::new()
        } else {
            format!("{}/", self.alias)
        };
        format!(
            "    location {url}/ {{\n        alias {static_root}/{alias};\n        try_files $uri $uri/ {url}/index.html;\n    }}"
        )
    }
}

/// Render every front as a location block, in registry order.
pub fn generate(fronts: &[FrontEntry], settings: &ProxySettings) -> String {
    fronts
        .iter()
        .map(|f| LocationBlock::from_front(f, settings).render(&settings.static_root))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Splice generated blocks into the base config at [`LOCATIONS_TOKEN`].
///
/// Leading whitespace of the blocks is dropped so the token's own indentation
/// applies to the first line.
pub fn render_config(template_name: &str, template: &str, blocks: &str) -> Result<String, DomainError> {
    if !template.contains(LOCATIONS_TOKEN) {
        return Err(DomainError::MissingSplicePoint {
            template: template_name.to_string(),
            token: LOCATIONS_TOKEN.to_string(),
        });
    }
    Ok(template.replacen(LOCATIONS_TOKEN, blocks.trim(), 1))
}
