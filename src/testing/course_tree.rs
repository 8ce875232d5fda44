//! Throwaway course trees on disk for engine, archive and command tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A course root in a temporary directory, removed on drop.
pub struct CourseTree {
    dir: TempDir,
}

impl CourseTree {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("create temp course root") }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, content).expect("write course file");
        self
    }

    /// Create `relative` as a symlink pointing at `target` (stored verbatim).
    #[cfg(unix)]
    pub fn symlink(&self, relative: &str, target: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        std::os::unix::fs::symlink(target, &path).expect("create symlink");
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read course file")
    }

    pub fn is_symlink(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path(relative))
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }
}
