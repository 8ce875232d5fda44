//! Packs a course tree into the gzip tarball Studio imports.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use walkdir::WalkDir;

use crate::domain::AppError;
use crate::domain::taxonomy::{ARCHIVE_DIRECTORIES, ARCHIVE_FILES};

/// Top-level directory inside every course archive.
pub const ARCHIVE_ROOT: &str = "course";

/// Builds `{base_name}.tar.gz` from the allow-listed parts of a course root.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    root: PathBuf,
    base_name: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(root: impl Into<PathBuf>, base_name: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), base_name: base_name.into() }
    }

    /// Path of the archive this builder writes.
    pub fn archive_path(&self) -> PathBuf {
        let mut name = OsString::from(self.base_name.as_os_str());
        name.push(".tar.gz");
        PathBuf::from(name)
    }

    /// Stage, compress, and clean up. Returns the archive path.
    pub fn make_archive(&self) -> Result<PathBuf, AppError> {
        let staging = tempfile::Builder::new().prefix("olx-archive").tempdir()?;
        let course_dir = staging.path().join(ARCHIVE_ROOT);
        fs::create_dir_all(&course_dir)?;

        for dir in ARCHIVE_DIRECTORIES {
            let source = self.root.join(dir);
            if fs::symlink_metadata(&source).is_err() {
                tracing::debug!(directory = dir, "not present, skipping");
                continue;
            }
            copy_tree(&source, &course_dir.join(dir))?;
        }

        for file in ARCHIVE_FILES {
            let source = self.root.join(file);
            if source.is_file() {
                fs::copy(&source, course_dir.join(file))?;
            } else {
                tracing::debug!(file = file, "not present, skipping");
            }
        }

        let archive = self.archive_path();
        write_tarball(&course_dir, &archive)?;
        staging.close()?;

        tracing::info!(archive = %archive.display(), "archive written");
        Ok(archive)
    }
}

/// Recursive copy that recreates symlinks instead of following them.
fn copy_tree(source: &Path, dest: &Path) -> Result<(), AppError> {
    for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        let file_type = entry.file_type();
        if file_type.is_symlink() && entry.depth() > 0 {
            copy_link(entry.path(), &target)?;
        } else if entry.path().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(link: &Path, dest: &Path) -> Result<(), AppError> {
    let target = fs::read_link(link)?;
    std::os::unix::fs::symlink(target, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_link(link: &Path, dest: &Path) -> Result<(), AppError> {
    if link.is_dir() {
        copy_tree(&link.canonicalize()?, dest)
    } else {
        fs::copy(link, dest)?;
        Ok(())
    }
}

fn write_tarball(course_dir: &Path, archive: &Path) -> Result<(), AppError> {
    let encoder = GzEncoder::new(File::create(archive)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);
    builder.append_dir_all(ARCHIVE_ROOT, course_dir)?;
    builder.into_inner()?.finish()?;
    Ok(())
}
