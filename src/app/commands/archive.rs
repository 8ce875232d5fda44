//! `archive`: package a course tree for import.

use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::services::ArchiveBuilder;

/// Archive base name used when none is given.
pub const DEFAULT_BASE_NAME: &str = "archive";

pub fn execute(root: &Path, base_name: Option<&Path>) -> Result<PathBuf, AppError> {
    let base_name = base_name.unwrap_or(Path::new(DEFAULT_BASE_NAME));
    if !root.is_dir() {
        return Err(AppError::config_error(format!("Course root {} is not a directory", root.display())));
    }
    ArchiveBuilder::new(root, base_name).make_archive()
}
