//! Library entry points wiring the concrete adapters into the commands.

use std::path::{Path, PathBuf};

use crate::app::commands::{archive as archive_cmd, new_run, token as token_cmd, upload as upload_cmd};
use crate::app::config::{CmsOverrides, load_with_overrides};
use crate::domain::{AppError, CourseId};
use crate::services::{GitBranchManager, HttpImportClient, course_id_from_archive};

pub use crate::app::commands::new_run::{NewRunOptions, NewRunOutcome};
pub use crate::app::commands::upload::UploadOutcome;

/// Upload request as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub archive: PathBuf,
    pub course_id: Option<String>,
    pub wait: bool,
    pub cms: CmsOverrides,
}

/// Create a new course run in the current directory.
pub fn new_run(options: &NewRunOptions) -> Result<NewRunOutcome, AppError> {
    let context = options.context()?;
    let root = std::env::current_dir()?;

    if options.create_branch {
        let branches = GitBranchManager::new(&root, context.run_name());
        new_run::execute(&root, context, Some(&branches))
    } else {
        new_run::execute::<GitBranchManager>(&root, context, None)
    }
}

/// Build `{base_name}.tar.gz` from the course at `root` (default: current directory).
pub fn archive(root: Option<&Path>, base_name: Option<&Path>) -> Result<PathBuf, AppError> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir()?,
    };
    archive_cmd::execute(&root, base_name)
}

/// Fetch a bearer token using `olx.toml`, environment and the given overrides.
pub fn token(cms: CmsOverrides) -> Result<String, AppError> {
    let config = load_with_overrides(&std::env::current_dir()?, cms)?;
    token_cmd::execute(&config.cms)
}

/// Import an archive into Studio, optionally waiting for the import to finish.
pub fn upload(options: UploadOptions) -> Result<UploadOutcome, AppError> {
    let config = load_with_overrides(&std::env::current_dir()?, options.cms)?;

    let course_id = match options.course_id {
        Some(id) => CourseId::new(id),
        None => course_id_from_archive(&options.archive)?,
    };
    tracing::info!(course_id = %course_id, archive = %options.archive.display(), "uploading");

    let token = token_cmd::execute(&config.cms)?;
    let client = HttpImportClient::from_config(&config.cms, course_id, token)?;
    upload_cmd::execute(&client, &options.archive, options.wait, &config.upload, std::thread::sleep)
}
