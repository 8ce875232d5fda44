use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::AppError;
use crate::domain::taxonomy::{POLICIES_DIR, POLICY_BASE_DIR};

/// Points `policies/{run}` at the shared `_base` policy directory.
#[derive(Debug, Clone)]
pub struct PolicyLinker {
    root: PathBuf,
}

impl PolicyLinker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create `policies/{run_name} -> _base`, replacing an existing link.
    ///
    /// A real directory already at that path is left alone and reported as an error.
    pub fn link(&self, run_name: &str) -> Result<PathBuf, AppError> {
        let link = self.root.join(POLICIES_DIR).join(run_name);
        self.replace_link(&link).map_err(|e| {
            tracing::debug!(link = %link.display(), error = %e, "policy link failed");
            AppError::Operation("Error creating policies symlink.".to_string())
        })?;
        tracing::info!(link = %link.display(), "linked run policies to {}", POLICY_BASE_DIR);
        Ok(link)
    }

    fn replace_link(&self, link: &std::path::Path) -> io::Result<()> {
        if let Some(parent) = link.parent()
            && !parent.is_dir()
        {
            return Err(io::Error::new(io::ErrorKind::NotFound, "policies directory missing"));
        }
        match fs::symlink_metadata(link) {
            Ok(meta) if meta.file_type().is_symlink() => fs::remove_file(link)?,
            Ok(_) => {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, "not a symlink"));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        symlink_dir(POLICY_BASE_DIR, link)
    }
}

#[cfg(unix)]
fn symlink_dir(target: &str, link: &std::path::Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &str, link: &std::path::Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
