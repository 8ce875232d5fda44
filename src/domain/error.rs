use std::io;

use thiserror::Error;

/// Library-wide error type for olx operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Command input rejected before any side effect.
    #[error("{0}")]
    Validation(String),

    /// A date argument could not be parsed.
    #[error("Not a valid date: '{0}'.")]
    InvalidDate(String),

    /// A template failed to render. `details` carries the template-level diagnostic.
    #[error("Failed to render template {template}:\n{details}")]
    Render { template: String, details: String },

    /// An external collaborator (git, symlink creation) failed.
    #[error("{0}")]
    Operation(String),

    /// No `course.xml` directly below the archive's top-level directory.
    #[error("Can't find course.xml in root directory of archive {archive}")]
    CourseXmlNotFound { archive: String },

    /// More than one `course.xml` directly below a top-level directory.
    #[error("Found more than one course.xml in root directory of archive {archive}")]
    AmbiguousCourseXml { archive: String },

    /// The archive or its `course.xml` could not be read.
    #[error("Unable to determine course ID from archive {archive}: {details}")]
    CourseIdUnreadable { archive: String, details: String },

    /// The archive to upload could not be opened.
    #[error("Unable to read archive {archive}: {source}")]
    ArchiveUnreadable {
        archive: String,
        #[source]
        source: io::Error,
    },

    /// Client ID missing for the credentials grant.
    #[error("No client ID specified.")]
    MissingClientId,

    /// Client secret missing for the credentials grant.
    #[error("No client secret specified.")]
    MissingClientSecret,

    /// Non-2xx response from the CMS.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// Transport-level request failure.
    #[error("HTTP request to {url} failed: {details}")]
    RequestFailed { url: String, details: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from {url}: {details}")]
    InvalidResponse { url: String, details: String },

    /// The import task reached the `Failed` state.
    #[error("Course upload to {course_id} from {archive} failed")]
    UploadFailed { course_id: String, archive: String },

    /// The import task never reached a terminal state within the poll budget.
    #[error("Course upload to {course_id} from {archive} still pending after {attempts} status checks")]
    UploadTimedOut { course_id: String, archive: String, attempts: u32 },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// Process exit status for the outermost caller.
    ///
    /// Usage errors (bad run name, bad dates) exit with 2, like a rejected
    /// command-line argument; every other failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) | AppError::InvalidDate(_) => 2,
            _ => 1,
        }
    }

    /// Provide an `io::ErrorKind`-like view of the failure.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) | AppError::ArchiveUnreadable { source: err, .. } => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::InvalidDate(_)
            | AppError::MissingClientId
            | AppError::MissingClientSecret
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::CourseXmlNotFound { .. } => io::ErrorKind::NotFound,
            AppError::AmbiguousCourseXml { .. }
            | AppError::CourseIdUnreadable { .. }
            | AppError::InvalidResponse { .. }
            | AppError::Render { .. } => io::ErrorKind::InvalidData,
            AppError::UploadTimedOut { .. } => io::ErrorKind::TimedOut,
            AppError::Operation(_)
            | AppError::Http { .. }
            | AppError::RequestFailed { .. }
            | AppError::UploadFailed { .. } => io::ErrorKind::Other,
        }
    }
}
