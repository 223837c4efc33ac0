//! Per-domain Express router modules.
//!
//! The router for domain `admin/reports` lives at
//! `src/routes/admin/reports/route.reports.ts` and exports `routerReports`.
//! Maintenance is additive: lines are appended, never rewritten, and a line
//! already present (compared trimmed) is never added twice.

use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;
use crate::domain::import_path;
use crate::domain::naming::{DomainPath, FeatureName, to_pascal_case};

/// Everything needed to wire one feature into its domain router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Router file, relative to the project root.
    pub router_file: PathBuf,
    pub router_var: String,
    pub controller_class: String,
    pub import_line: String,
    pub route_line: String,
}

impl RouteSpec {
    pub fn new(domain: &DomainPath, feature: &FeatureName) -> Result<Self, DomainError> {
        let last = domain.last_segment();
        let routes_dir = Path::new("src").join("routes").join(domain.to_path());
        let router_file = routes_dir.join(format!("route.{last}.ts"));
        let controller_file = controller_path(domain, feature);

        let router_var = format!("router{}", to_pascal_case(last));
        let controller_class = format!("{}Controller", feature.pascal());
        let specifier = import_path::resolve(&routes_dir, &controller_file)?;

        Ok(Self {
            import_line: format!("import {{ {controller_class} }} from '{specifier}';"),
            route_line: format!(
                "{router_var}.get('/{}', {controller_class}.get);",
                feature.kebab()
            ),
            router_file,
            router_var,
            controller_class,
        })
    }

    /// Full text of a freshly created router module.
    pub fn initial_text(&self) -> String {
        format!(
            "import {{ Router }} from 'express';\n{}\n\nexport const {} = Router();\n\n{}\n",
            self.import_line, self.router_var, self.route_line
        )
    }
}

/// `src/controllers/<domain>/<camel>.controller.ts`, relative to the project root.
pub fn controller_path(domain: &DomainPath, feature: &FeatureName) -> PathBuf {
    Path::new("src")
        .join("controllers")
        .join(domain.to_path())
        .join(format!("{}.controller.ts", feature.camel()))
}

/// `src/services/<domain>/<camel>.service.ts`, relative to the project root.
pub fn service_path(domain: &DomainPath, feature: &FeatureName) -> PathBuf {
    Path::new("src")
        .join("services")
        .join(domain.to_path())
        .join(format!("{}.service.ts", feature.camel()))
}

/// What to do with the router file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterPlan {
    Create(String),
    /// The complete new text: the old text followed by the missing lines.
    Append { text: String, added: Vec<String> },
    Unchanged,
}

/// Decide how to bring `existing` up to date with `spec`.
pub fn plan(existing: Option<&str>, spec: &RouteSpec) -> RouterPlan {
    let Some(current) = existing else {
        return RouterPlan::Create(spec.initial_text());
    };

    let present: Vec<&str> = current
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let added: Vec<String> = [&spec.import_line, &spec.route_line]
        .into_iter()
        .filter(|line| !present.contains(&line.trim()))
        .cloned()
        .collect();

    if added.is_empty() {
        return RouterPlan::Unchanged;
    }

    let mut text = current.to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    for line in &added {
        text.push_str(line);
        text.push('\n');
    }
    RouterPlan::Append { text, added }
}
