//! Studio course import API client using reqwest.

use std::path::Path;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, CmsConfig, CourseId, TaskState};
use crate::ports::ImportClient;
use crate::services::cms_http::{build_client, endpoint, read_json, request_failed};

const COURSE_DATA_FIELD: &str = "course_data";

/// HTTP client for one course's import endpoint.
#[derive(Clone)]
pub struct HttpImportClient {
    course_id: CourseId,
    endpoint: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for HttpImportClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImportClient")
            .field("course_id", &self.course_id)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    state: String,
}

impl HttpImportClient {
    pub fn new(url: &Url, course_id: CourseId, token: String, timeout_secs: u64) -> Result<Self, AppError> {
        let endpoint = endpoint(url, &format!("/api/courses/v0/import/{}/", course_id));
        Ok(Self { course_id, endpoint, token, client: build_client(timeout_secs)? })
    }

    pub fn from_config(config: &CmsConfig, course_id: CourseId, token: String) -> Result<Self, AppError> {
        Self::new(config.require_url()?, course_id, token, config.timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorization(&self) -> String {
        format!("JWT {}", self.token)
    }
}

impl ImportClient for HttpImportClient {
    fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    fn upload(&self, archive: &Path) -> Result<String, AppError> {
        let form = Form::new().file(COURSE_DATA_FIELD, archive).map_err(|source| {
            AppError::ArchiveUnreadable { archive: archive.display().to_string(), source }
        })?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .multipart(form)
            .send()
            .map_err(|e| request_failed(&self.endpoint, e))?;

        let body: UploadResponse = read_json(response, &self.endpoint)?;
        tracing::info!(course_id = %self.course_id, task_id = %body.task_id, "import task created");
        Ok(body.task_id)
    }

    fn fetch_state(&self, task_id: &str, archive: &Path) -> Result<TaskState, AppError> {
        let filename = archive.to_string_lossy();
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .query(&[("task_id", task_id), ("filename", filename.as_ref())])
            .send()
            .map_err(|e| request_failed(&self.endpoint, e))?;

        let body: StatusResponse = read_json(response, &self.endpoint)?;
        Ok(TaskState::from_api(&body.state))
    }
}
