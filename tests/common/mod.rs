//! Shared testing utilities for opsbench CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated workbench root for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated workbench directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Create a workbench directory and run `opsbench init` in it.
    pub fn initialized() -> Self {
        let ctx = Self::new();
        ctx.cli().arg("init").assert().success();
        ctx
    }

    /// Absolute path to the workbench root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `opsbench` binary in the
    /// workbench root.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("opsbench").expect("Failed to locate opsbench binary");
        cmd.current_dir(self.root());
        cmd
    }

    /// Path under `knowledge/`.
    pub fn knowledge_path(&self, rel: &str) -> PathBuf {
        self.root().join("knowledge").join(rel)
    }

    /// Write a file under `knowledge/`, creating parent directories.
    pub fn write_knowledge(&self, rel: &str, content: &str) {
        let path = self.knowledge_path(rel);
        fs::create_dir_all(path.parent().expect("knowledge file has a parent"))
            .expect("Failed to create knowledge directories");
        fs::write(path, content).expect("Failed to write knowledge file");
    }

    /// Path to the outputs directory.
    pub fn outputs_root(&self) -> PathBuf {
        self.root().join("data").join("outputs")
    }

    /// Assert the scaffolded workbench structure exists.
    pub fn assert_workbench_structure_exists(&self) {
        assert!(self.knowledge_path("general").is_dir(), "general/ should exist");
        assert!(self.knowledge_path("platforms").is_dir(), "platforms/ should exist");
        assert!(self.outputs_root().is_dir(), "data/outputs should exist");
        assert!(self.root().join("data/store").is_dir(), "data/store should exist");
        assert!(self.root().join("data/tmp").is_dir(), "data/tmp should exist");
    }
}
