//! olx-utils: render templated OLX course trees, package them, and import them into Studio.
//!
//! A course tree is rendered in place for a new run ([`new_run`]), packed into
//! a `course/`-rooted tarball ([`archive`]), and posted to the Studio import
//! API ([`upload`]), which can poll the import task until it finishes.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    NewRunOptions, NewRunOutcome, UploadOptions, UploadOutcome, archive, new_run, token, upload,
};
pub use app::config::CmsOverrides;
pub use domain::{AppError, CourseId, RenderContext, TaskState};
pub use services::{RenderReport, TemplateEngine, course_id_from_archive};
