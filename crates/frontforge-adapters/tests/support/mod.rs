//! Shared fixtures for the adapter-level tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mockall::mock;
use tempfile::TempDir;

use frontforge_adapters::{DirectoryFragmentLibrary, LocalFilesystem};
use frontforge_core::{
    application::{GenerationService, GenerationSettings, InitOptions, ProjectService},
    domain::{BackendFlavor, RuntimeLayout},
    error::ForgeResult,
    prelude::{CommandSpec, ProcessRunner},
};

mock! {
    pub Runner {}

    impl ProcessRunner for Runner {
        fn run(&self, command: &CommandSpec) -> ForgeResult<()>;
    }
}

/// The template set shipped with the repository.
pub fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

/// A throwaway project directory wired to the shipped templates.
pub struct Project {
    pub dir: TempDir,
    pub layout: RuntimeLayout,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = RuntimeLayout::new(dir.path(), templates_root());
        Self { dir, layout }
    }

    pub fn with_backend(flavor: BackendFlavor) -> Self {
        let project = Self::new();
        ProjectService::new(Arc::new(LocalFilesystem::new()), Arc::new(idle_runner()))
            .init_project(
                &project.layout,
                &InitOptions::new(flavor).install_dependencies(false),
            )
            .expect("init project");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("reading {relative}: {e}"))
    }

    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).expect("valid json")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    pub fn service(&self, runner: MockRunner) -> GenerationService {
        GenerationService::new(
            Arc::new(LocalFilesystem::new()),
            Arc::new(DirectoryFragmentLibrary::new(templates_root())),
            Arc::new(runner),
            GenerationSettings::default(),
        )
    }
}

/// A runner that accepts nothing.
pub fn idle_runner() -> MockRunner {
    let mut runner = MockRunner::new();
    runner.expect_run().never();
    runner
}

/// A runner that succeeds, records each command line, and plays the part
/// of `npm init` by writing a minimal `package.json` into the new front.
pub fn npm_runner(log: Arc<Mutex<Vec<String>>>) -> MockRunner {
    let mut runner = MockRunner::new();
    runner.expect_run().returning(move |cmd| {
        if cmd.args.first().map(String::as_str) == Some("init") {
            if let Some(target) = cmd.args.last() {
                let dir = cmd.cwd.join(target);
                std::fs::create_dir_all(&dir).expect("mkdir front");
                std::fs::write(
                    dir.join("package.json"),
                    r#"{"name":"front","scripts":{"dev":"vite","build":"vite build"}}"#,
                )
                .expect("write package.json");
            }
        }
        log.lock().expect("log").push(cmd.to_string());
        Ok(())
    });
    runner
}
