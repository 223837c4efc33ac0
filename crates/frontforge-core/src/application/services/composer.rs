//! Artifact Composer - builds the text of a controller or service file.
//!
//! Composition is three substitutions: the constructor fragment, the method
//! fragment, then the base template with both blocks spliced in. Every
//! fragment is checked against the placeholders the catalog declares for it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ports::FragmentLibrary,
    domain::{
        ArtifactKind, DomainError, FeatureDescriptor, FragmentRole, PlaceholderValues,
        RuntimeLayout, catalog,
        import_path::{self, to_posix},
        placeholder,
        router::{controller_path, service_path},
    },
    error::ForgeResult,
};

/// What a generated file should do when its target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail the step with `ArtifactConflict`.
    Abort,
    /// Leave the existing file alone and record a warning.
    SkipWithWarning,
}

/// A composed file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

/// Shared project locations referenced by the generated imports.
fn generic_token_module(root: &Path) -> PathBuf {
    root.join("src").join("classes").join("generic").join("token")
}

fn http_exception_module(root: &Path) -> PathBuf {
    root.join("src").join("classes").join("http").join("exception")
}

pub struct ArtifactComposer {
    fragments: Arc<dyn FragmentLibrary>,
}

impl ArtifactComposer {
    pub fn new(fragments: Arc<dyn FragmentLibrary>) -> Self {
        Self { fragments }
    }

    /// Compose the file for `descriptor` (a controller or service).
    #[instrument(skip_all, fields(artifact = %descriptor))]
    pub fn compose(
        &self,
        layout: &RuntimeLayout,
        descriptor: &FeatureDescriptor,
    ) -> ForgeResult<GeneratedArtifact> {
        let kind = descriptor.kind();
        let (path, values) = match kind {
            ArtifactKind::Controller => self.controller_values(layout, descriptor)?,
            ArtifactKind::Service => self.service_values(layout, descriptor)?,
            ArtifactKind::Frontend => {
                return Err(DomainError::UnknownArtifactKind(
                    "frontend has no composed source file".into(),
                )
                .into());
            }
        };
        let mut values = values;

        let ctor = variant_or_default(descriptor.constructor_variant(), kind, FragmentRole::Constructor)?;
        let method = variant_or_default(descriptor.method_variant(), kind, FragmentRole::Method)?;

        let ctor_block = self.render(kind, FragmentRole::Constructor, &ctor, &values)?;
        let method_block = self.render(kind, FragmentRole::Method, &method, &values)?;

        let (ctor_slot, method_slot) = match kind {
            ArtifactKind::Controller => ("ControllerConstructor", "ControllerMethod"),
            _ => ("ConstructorCode", "MethodCode"),
        };
        values.set(ctor_slot, ctor_block);
        values.set(method_slot, method_block);

        let content = self.render(kind, FragmentRole::Base, catalog::BASE_VARIANT, &values)?;
        debug!(path = %path.display(), bytes = content.len(), "Artifact composed");

        Ok(GeneratedArtifact {
            kind,
            path,
            content,
        })
    }

    fn render(
        &self,
        kind: ArtifactKind,
        role: FragmentRole,
        variant: &str,
        values: &PlaceholderValues,
    ) -> ForgeResult<String> {
        let def = catalog::lookup(kind, role, variant)?;
        let key = def.key();
        let text = self.fragments.load(&key)?;
        let out = placeholder::substitute(&key.to_string(), &text, def.placeholders, values)?;
        Ok(out)
    }

    fn controller_values(
        &self,
        layout: &RuntimeLayout,
        d: &FeatureDescriptor,
    ) -> ForgeResult<(PathBuf, PlaceholderValues)> {
        let root = layout.project_root();
        let file = root.join(controller_path(d.domain(), d.feature()));
        let dir = parent_of(&file);
        let service_file = root.join(service_path(d.domain(), d.feature()));

        let values = feature_values(d)
            .with("SessionRole", d.domain().last_segment())
            .with(
                "RelativePathController",
                import_path::resolve(&dir, &dir)?.into_string(),
            )
            .with("ControllerFileName", format!("{}.controller", d.feature().camel()))
            .with(
                "RelativePathGenericToken",
                import_path::resolve(&dir, &generic_token_module(root))?.into_string(),
            )
            .with(
                "RelativePathService",
                import_path::resolve(&dir, &service_file)?.into_string(),
            );
        Ok((file, values))
    }

    fn service_values(
        &self,
        layout: &RuntimeLayout,
        d: &FeatureDescriptor,
    ) -> ForgeResult<(PathBuf, PlaceholderValues)> {
        let root = layout.project_root();
        let file = root.join(service_path(d.domain(), d.feature()));
        let dir = parent_of(&file);

        let values = feature_values(d)
            .with("ServiceName", format!("{}Service", d.feature().pascal()))
            .with("Domain", d.domain().as_str())
            .with("FrontName", d.feature().camel())
            .with("RoutePath", to_posix(&file))
            .with(
                "RelativePathGenericToken",
                import_path::resolve(&dir, &generic_token_module(root))?.into_string(),
            )
            .with(
                "RelativePathHttpException",
                import_path::resolve(&dir, &http_exception_module(root))?.into_string(),
            );
        Ok((file, values))
    }
}

fn feature_values(d: &FeatureDescriptor) -> PlaceholderValues {
    PlaceholderValues::new()
        .with("FeatureCamel", d.feature().camel())
        .with("FeaturePascal", d.feature().pascal())
        .with("FeatureKebab", d.feature().kebab())
}

fn parent_of(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn variant_or_default(
    chosen: Option<&crate::domain::VariantName>,
    kind: ArtifactKind,
    role: FragmentRole,
) -> Result<String, DomainError> {
    match chosen {
        Some(v) => Ok(v.as_str().to_string()),
        None => catalog::default_variant(kind, role)
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| DomainError::UnknownVariant {
                kind: kind.to_string(),
                role: role.to_string(),
                variant: "<default>".into(),
            }),
    }
}
