//! Integration tests for frontforge-core.
//!
//! These walk the pure domain pieces in the order a generation run uses
//! them, without any adapter.

use std::path::Path;

use frontforge_core::domain::{
    ArtifactKind, FeatureDescriptor, FrontEntry, FrontPlacement, ProxySettings, RegistryKind,
    RouteSpec, RouterPlan, UpsertOutcome, catalog, frontend, nginx,
    placeholder::{self, PlaceholderValues},
    registry, router,
};

#[test]
fn test_front_placement_feeds_registry_and_proxy() {
    let descriptor = FeatureDescriptor::parse(ArtifactKind::Frontend, "admin/reports/summary").unwrap();
    let placement = FrontPlacement::new("fronts", &descriptor);

    let vite = frontend::configure_vite(
        "export default { base: '__BASE_PATH__', build: { outDir: '__OUT_DIR__' } };",
        &placement,
    )
    .unwrap();
    assert_eq!(
        vite,
        "export default { base: '/admin/reports/summary/', build: { outDir: '../../../../public/admin/reports/summary' } };"
    );

    let mut rows = registry::parse_registry(None).entries;
    let entry = serde_json::to_value(placement.registry_entry(5173)).unwrap();
    assert_eq!(
        registry::upsert_entry(&mut rows, RegistryKind::Fronts.key_fields(), entry.clone()),
        UpsertOutcome::Inserted
    );
    assert_eq!(
        registry::upsert_entry(&mut rows, RegistryKind::Fronts.key_fields(), entry),
        UpsertOutcome::Unchanged
    );

    let (fronts, rejected) = registry::decode_entries::<FrontEntry>(&rows);
    assert!(rejected.is_empty());

    let blocks = nginx::generate(&fronts, &ProxySettings::default());
    let config = nginx::render_config(
        "default.conf.tpl",
        "server {\n    ##FRONTEND_LOCATIONS##\n}\n",
        &blocks,
    )
    .unwrap();
    assert!(config.starts_with("server {\n    location /admin/reports/summary/ {\n"));
    assert!(config.contains("alias /usr/share/nginx/html/admin/reports/summary/;"));
}

#[test]
fn test_package_json_round_trip_keeps_user_scripts() {
    let text = r#"{
  "name": "summary",
  "scripts": { "dev": "vite --host", "build": "vite build", "lint": "eslint ." }
}"#;
    let out = frontend::update_package_json(Path::new("package.json"), text, 5180).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["scripts"]["dev"], "vite --host --port 5180");
    assert_eq!(value["scripts"]["lint"], "eslint .");
    assert_eq!(value["scripts"]["build:dev"], frontend::BUILD_DEV_SCRIPT);
    assert!(out.ends_with("}\n"));

    // second pass is a no-op
    assert_eq!(
        frontend::update_package_json(Path::new("package.json"), &out, 5180).unwrap(),
        out
    );
}

#[test]
fn test_router_plan_converges() {
    let descriptor = FeatureDescriptor::parse(ArtifactKind::Controller, "shop/cart").unwrap();
    let spec = RouteSpec::new(descriptor.domain(), descriptor.feature()).unwrap();

    let RouterPlan::Create(text) = router::plan(None, &spec) else {
        panic!("expected a new router file");
    };
    assert_eq!(router::plan(Some(&text), &spec), RouterPlan::Unchanged);

    let other = FeatureDescriptor::parse(ArtifactKind::Controller, "shop/checkout").unwrap();
    let other_spec = RouteSpec::new(other.domain(), other.feature()).unwrap();
    let RouterPlan::Append { text, added } = router::plan(Some(&text), &other_spec) else {
        panic!("expected lines to be appended");
    };
    assert_eq!(added.len(), 2);
    assert_eq!(router::plan(Some(&text), &spec), RouterPlan::Unchanged);
    assert_eq!(router::plan(Some(&text), &other_spec), RouterPlan::Unchanged);
}

#[test]
fn test_catalog_placeholders_are_all_substitutable() {
    for def in catalog::FRAGMENT_CATALOG {
        let text: String = def
            .placeholders
            .iter()
            .map(|p| format!("${{{p}}}\n"))
            .collect();
        let mut values = PlaceholderValues::new();
        for p in def.placeholders {
            values.set(*p, "x");
        }

        let out = placeholder::substitute(&def.key().to_string(), &text, def.placeholders, &values)
            .unwrap();
        assert_eq!(out, "x\n".repeat(def.placeholders.len()), "{}", def.key());
    }
}

#[test]
fn test_unknown_variant_is_rejected_with_choices() {
    let err = FeatureDescriptor::parse(ArtifactKind::Controller, "shop/cart")
        .unwrap()
        .with_constructor("byMood")
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("byMood"));
    assert!(
        err.suggestions().iter().any(|s| s.contains("byRole")),
        "{:?}",
        err.suggestions()
    );
}
