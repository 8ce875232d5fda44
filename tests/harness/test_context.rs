//! Shared testing harness for `olx` integration tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated course directory for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create an empty course directory.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("course-repo");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Create a course directory populated with the demo course templates.
    pub(crate) fn with_demo_course() -> Self {
        let ctx = Self::new();
        super::demo_course::write(ctx.work_dir());
        ctx
    }

    /// Scratch space outside the course directory.
    pub(crate) fn scratch(&self) -> &Path {
        self.root.path()
    }

    /// Path to the course directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub(crate) fn path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }

    pub(crate) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub(crate) fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    pub(crate) fn is_symlink(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path(relative)).map(|m| m.file_type().is_symlink()).unwrap_or(false)
    }

    /// Build a command for invoking the compiled `olx` binary within the course directory.
    pub(crate) fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `olx` binary within a custom directory.
    pub(crate) fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("olx").expect("Failed to locate olx binary");
        cmd.current_dir(dir.as_ref())
            .env_remove("OLX_CMS_URL")
            .env_remove("OLX_CLIENT_ID")
            .env_remove("OLX_CLIENT_SECRET")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run `olx new-run NAME START END` and assert success.
    pub(crate) fn new_run(&self, name: &str, start: &str, end: &str) {
        self.cli().args(["new-run", name, start, end]).assert().success();
    }

    /// Run `action` with the process working directory set to the course directory.
    pub(crate) fn with_work_dir<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::current_dir().expect("Failed to capture current dir");
        env::set_current_dir(&self.work_dir).expect("Failed to switch current dir");
        let result = action();
        env::set_current_dir(original).expect("Failed to restore current dir");
        result
    }
}
