//! Registry upserts, `build_all`, the proxy config and project init on a
//! real temporary directory.

mod support;

use std::sync::Arc;

use mockall::predicate::function;
use pretty_assertions::assert_eq;

use frontforge_adapters::{LocalFilesystem, MemoryFilesystem};
use frontforge_core::{
    application::{
        ApplicationError, BuildEvent, BuildService, InitOptions, ProjectService, ProxyService,
        RegistryStore,
    },
    domain::{BackendFlavor, FrontEntry, ProxySettings, RegistryKind, RuntimeLayout, UpsertOutcome},
    error::ForgeError,
    prelude::Filesystem,
};

use support::{MockRunner, Project, idle_runner};

fn front(name: &str, path: &str, port: u16) -> FrontEntry {
    FrontEntry {
        name: name.into(),
        project_full_path: path.into(),
        port,
    }
}

fn register(project: &Project, entries: &[FrontEntry]) {
    let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
    let path = project.layout.registry_path(RegistryKind::Fronts);
    for entry in entries {
        store.upsert(&path, entry).unwrap();
    }
}

// ── registry ─────────────────────────────────────────────────────────────────

#[test]
fn test_upsert_same_entry_twice_leaves_file_untouched() {
    let project = Project::new();
    let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
    let path = project.layout.registry_path(RegistryKind::Fronts);
    let entry = front("cart", "fronts/shop/cart", 5173);

    let first = store.upsert(&path, &entry).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    let second = store.upsert(&path, &entry).unwrap();

    assert_eq!(first.outcome, UpsertOutcome::Inserted);
    assert_eq!(second.outcome, UpsertOutcome::Unchanged);
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[test]
fn test_upsert_replaces_by_key_and_keeps_order() {
    let project = Project::new();
    register(
        &project,
        &[
            front("cart", "fronts/shop/cart", 5173),
            front("users", "fronts/admin/users", 5174),
        ],
    );

    let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
    let report = store
        .upsert(
            &project.layout.registry_path(RegistryKind::Fronts),
            &front("cart", "fronts/shop/cart", 6000),
        )
        .unwrap();

    assert_eq!(report.outcome, UpsertOutcome::Replaced);
    let loaded = store
        .load::<FrontEntry>(&project.layout.registry_path(RegistryKind::Fronts))
        .unwrap();
    assert_eq!(
        loaded.entries,
        vec![
            front("cart", "fronts/shop/cart", 6000),
            front("users", "fronts/admin/users", 5174),
        ]
    );
}

#[test]
fn test_corrupt_registry_is_recovered_with_warning() {
    let project = Project::new();
    project.write(".frontforge/frontForgeFronts.json", "{ not json");

    let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
    let path = project.layout.registry_path(RegistryKind::Fronts);
    let report = store
        .upsert(&path, &front("cart", "fronts/shop/cart", 5173))
        .unwrap();

    assert_eq!(report.outcome, UpsertOutcome::Inserted);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("unusable"));
    assert_eq!(store.load::<FrontEntry>(&path).unwrap().entries.len(), 1);
}

#[test]
fn test_missing_registry_is_created_with_warning() {
    let project = Project::new();
    let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
    let path = project.layout.registry_path(RegistryKind::Fronts);

    let report = store
        .upsert(&path, &front("cart", "fronts/shop/cart", 5173))
        .unwrap();

    assert_eq!(report.outcome, UpsertOutcome::Inserted);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("does not exist"));
    assert!(store.load::<FrontEntry>(&path).unwrap().warnings.is_empty());
}

#[test]
fn test_concurrent_upserts_keep_every_entry() {
    let project = Project::new();
    let path = project.layout.registry_path(RegistryKind::Fronts);

    std::thread::scope(|scope| {
        for i in 0..16u16 {
            let path = &path;
            scope.spawn(move || {
                // one store per writer, as separate processes would have
                let store = RegistryStore::new(Arc::new(LocalFilesystem::new()));
                let entry = front(&format!("front{i}"), &format!("fronts/team/front{i}"), 5173 + i);
                store.upsert(path, &entry).unwrap();
            });
        }
    });

    let loaded = RegistryStore::new(Arc::new(LocalFilesystem::new()))
        .load::<FrontEntry>(&path)
        .unwrap();
    assert_eq!(loaded.entries.len(), 16);
    assert!(loaded.warnings.is_empty());
    let mut names: Vec<_> = loaded.entries.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 16);
}

#[test]
fn test_upsert_takes_the_registry_lock() {
    let fs = Arc::new(MemoryFilesystem::new());
    let store = RegistryStore::new(fs.clone());
    let layout = RuntimeLayout::new("/p", "/t");

    store
        .upsert(
            &layout.registry_path(RegistryKind::Fronts),
            &front("cart", "fronts/shop/cart", 5173),
        )
        .unwrap();

    assert_eq!(fs.locks_taken(), 1);
    assert!(fs.exists(&layout.registry_path(RegistryKind::Fronts)));
}

// ── build_all ────────────────────────────────────────────────────────────────

#[test]
fn test_build_all_builds_existing_and_skips_missing() {
    let project = Project::new();
    project.write("fronts/shop/cart/package.json", "{}");
    register(
        &project,
        &[
            front("cart", "fronts/shop/cart", 5173),
            front("gone", "fronts/admin/gone", 5174),
        ],
    );

    let cart_dir = project.path("fronts/shop/cart");
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .with(function(move |c: &frontforge_core::prelude::CommandSpec| {
            c.cwd == cart_dir && c.args == ["run", "build"]
        }))
        .times(1)
        .returning(|_| Ok(()));

    let service = BuildService::new(Arc::new(LocalFilesystem::new()), Arc::new(runner));
    let mut started = Vec::new();
    let report = service
        .build_all_with(&project.layout, &mut |event| {
            if let BuildEvent::Started { index, total, front } = event {
                started.push(format!("{}/{} {}", index + 1, total, front.name));
            }
        })
        .unwrap();

    assert_eq!(started, vec!["1/2 cart", "2/2 gone"]);
    assert_eq!(report.built, vec!["cart".to_string()]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "gone");
    assert!(report.failed.is_empty());
}

#[test]
fn test_build_all_continues_after_failure() {
    let project = Project::new();
    project.write("fronts/a/one/package.json", "{}");
    project.write("fronts/a/two/package.json", "{}");
    register(
        &project,
        &[
            front("one", "fronts/a/one", 5173),
            front("two", "fronts/a/two", 5174),
        ],
    );

    let mut runner = MockRunner::new();
    runner.expect_run().times(2).returning(|cmd| {
        if cmd.cwd.ends_with("one") {
            Err(ApplicationError::ProcessExecutionFailure {
                command: cmd.to_string(),
                cwd: cmd.cwd.clone(),
                status: Some(2),
                reason: "exited with 2".into(),
            }
            .into())
        } else {
            Ok(())
        }
    });

    let report = BuildService::new(Arc::new(LocalFilesystem::new()), Arc::new(runner))
        .build_all(&project.layout)
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "one");
    assert_eq!(report.built, vec!["two".to_string()]);
    assert_eq!(report.total(), 2);
}

#[test]
fn test_build_all_with_no_registry_does_nothing() {
    let project = Project::new();
    let report = BuildService::new(Arc::new(LocalFilesystem::new()), Arc::new(idle_runner()))
        .build_all(&project.layout)
        .unwrap();
    assert_eq!(report.total(), 0);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("does not exist"));
}

// ── proxy ────────────────────────────────────────────────────────────────────

#[test]
fn test_proxy_config_has_one_location_per_front() {
    let project = Project::new();
    register(
        &project,
        &[
            front("summary", "fronts/admin/reports/summary", 5173),
            front("cart", "fronts/shop/cart", 5174),
        ],
    );

    let report = ProxyService::new(Arc::new(LocalFilesystem::new()))
        .write_proxy_config(&project.layout, &ProxySettings::default(), "docker/nginx")
        .unwrap();

    assert_eq!(report.locations, 2);
    assert_eq!(report.output, project.path("docker/nginx/default.conf"));

    let conf = project.read("docker/nginx/default.conf");
    assert!(conf.contains("    location /admin/reports/summary/ {"));
    assert!(conf.contains("alias /usr/share/nginx/html/admin/reports/summary/;"));
    assert!(conf.contains("    location /shop/cart/ {"));
    assert!(!conf.contains("##FRONTEND_LOCATIONS##"));
    assert!(conf.find("/admin/reports/summary/").unwrap() < conf.find("/shop/cart/").unwrap());
    assert_eq!(conf.matches('{').count(), conf.matches('}').count());
}

#[test]
fn test_proxy_config_without_template_fails() {
    let project = Project::new();
    let layout = RuntimeLayout::new(project.root(), project.path("no-templates"));

    let err = ProxyService::new(Arc::new(LocalFilesystem::new()))
        .write_proxy_config(&layout, &ProxySettings::default(), "docker/nginx")
        .unwrap_err();

    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::TemplateNotFound { .. })
    ));
}

// ── init ─────────────────────────────────────────────────────────────────────

fn project_service(runner: MockRunner) -> ProjectService {
    ProjectService::new(Arc::new(LocalFilesystem::new()), Arc::new(runner))
}

fn no_install(flavor: BackendFlavor) -> InitOptions {
    InitOptions::new(flavor).install_dependencies(false)
}

#[test]
fn test_init_express_creates_config_and_registries() {
    let project = Project::new();
    let service = project_service(idle_runner());

    let report = service
        .init_project(&project.layout, &no_install(BackendFlavor::Express))
        .unwrap();

    assert_eq!(report.created_registries.len(), 3);
    assert_eq!(
        project.read_json(".frontforge/config.json"),
        serde_json::json!({ "backendType": "express" })
    );
    assert_eq!(project.read(".frontforge/express/services.json"), "[]\n");
    assert_eq!(service.backend(&project.layout).unwrap(), BackendFlavor::Express);
    assert!(!report.installed);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_init_express_lays_backend_skeleton_and_installs() {
    let project = Project::new();
    let root = project.root().to_path_buf();
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .with(function(move |c: &frontforge_core::prelude::CommandSpec| {
            c.cwd == root && c.program == "npm" && c.args == ["install"]
        }))
        .times(1)
        .returning(|_| Ok(()));

    let report = project_service(runner)
        .init_project(&project.layout, &InitOptions::new(BackendFlavor::Express))
        .unwrap();

    assert!(report.installed);
    for file in [
        "src/index.ts",
        "src/classes/generic/token.ts",
        "src/classes/generic/validator.ts",
        "src/classes/generic/sanitizer.ts",
        "src/classes/http/exception.ts",
        "src/classes/http/error/handler.ts",
        "src/interfaces/interface.server.ts",
        "src/types/generic.types.ts",
        "package.json",
        "tsconfig.json",
        ".env",
        ".gitignore",
    ] {
        assert!(project.path(file).is_file(), "{file} missing");
        assert!(report.scaffolded.contains(&project.path(file)), "{file} not reported");
    }
    for dir in ["config", "public", "src/routes"] {
        assert!(project.path(dir).is_dir(), "{dir} missing");
    }
    assert!(!project.path("_env").exists());
    assert!(project.read("src/classes/generic/token.ts").contains("export class Token"));
    assert!(project.read("src/classes/http/exception.ts").contains("export class HttpException"));
    assert_eq!(project.read_json("package.json")["dependencies"]["express"], "^4.19.2");
    assert!(project.read(".gitignore").contains("node_modules"));
}

#[test]
fn test_init_keeps_existing_backend_files() {
    let project = Project::new();
    project.write("package.json", r#"{"name":"mine"}"#);
    project.write("src/index.ts", "// mine\n");

    let report = project_service(idle_runner())
        .init_project(&project.layout, &no_install(BackendFlavor::Express))
        .unwrap();

    assert_eq!(project.read("package.json"), r#"{"name":"mine"}"#);
    assert_eq!(project.read("src/index.ts"), "// mine\n");
    assert_eq!(
        report.kept,
        vec![project.path("package.json"), project.path("src/index.ts")]
    );
    assert!(project.path("src/classes/generic/token.ts").exists());
}

#[test]
fn test_init_install_failure_is_a_warning() {
    let project = Project::new();
    let mut runner = MockRunner::new();
    runner.expect_run().times(1).returning(|cmd| {
        Err(ApplicationError::ProcessExecutionFailure {
            command: cmd.to_string(),
            cwd: cmd.cwd.clone(),
            status: Some(1),
            reason: "exited with 1".into(),
        }
        .into())
    });

    let report = project_service(runner)
        .init_project(&project.layout, &InitOptions::new(BackendFlavor::Express))
        .unwrap();

    assert!(!report.installed);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("npm install"));
    assert!(project.path(".frontforge/config.json").exists());
}

#[test]
fn test_init_without_backend_lays_no_skeleton() {
    let project = Project::new();

    let report = project_service(idle_runner())
        .init_project(&project.layout, &InitOptions::new(BackendFlavor::None))
        .unwrap();

    assert_eq!(report.created_registries.len(), 1);
    assert!(report.scaffolded.is_empty());
    assert!(!project.path("src").exists());
    assert!(!project.path("package.json").exists());
}

#[test]
fn test_init_express_without_skeleton_templates_writes_nothing() {
    let project = Project::new();
    let layout = RuntimeLayout::new(project.root(), project.path("no-templates"));

    let err = project_service(idle_runner())
        .init_project(&layout, &no_install(BackendFlavor::Express))
        .unwrap_err();

    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::TemplateNotFound { .. })
    ));
    assert!(!project.path(".frontforge").exists());
}

#[test]
fn test_init_twice_requires_force() {
    let project = Project::new();
    let service = project_service(idle_runner());
    service
        .init_project(&project.layout, &no_install(BackendFlavor::None))
        .unwrap();

    let err = service
        .init_project(&project.layout, &no_install(BackendFlavor::Express))
        .unwrap_err();
    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::AlreadyInitialized { .. })
    ));

    let report = service
        .init_project(&project.layout, &no_install(BackendFlavor::Express).force(true))
        .unwrap();
    // the fronts registry already existed
    assert_eq!(report.created_registries.len(), 2);
    assert_eq!(service.backend(&project.layout).unwrap(), BackendFlavor::Express);

    let again = service
        .init_project(&project.layout, &no_install(BackendFlavor::Express).force(true))
        .unwrap();
    assert!(again.scaffolded.is_empty());
    assert!(again.kept.contains(&project.path("src/classes/generic/token.ts")));
}
