use std::path::Path;

use crate::domain::{AppError, CourseId, TaskState};

/// Port for the Studio course import API.
///
/// An implementation is bound to one CMS, one course ID and one bearer token.
pub trait ImportClient {
    /// Course the archive is imported into.
    fn course_id(&self) -> &CourseId;

    /// Post the archive and return the import task ID.
    fn upload(&self, archive: &Path) -> Result<String, AppError>;

    /// Current state of an import task.
    fn fetch_state(&self, task_id: &str, archive: &Path) -> Result<TaskState, AppError>;
}
