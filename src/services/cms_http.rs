//! Blocking HTTP plumbing shared by the CMS clients.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::AppError;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))
}

/// `{base}{path}` where `path` starts with `/`, tolerating a trailing slash on `base`.
pub(crate) fn endpoint(base: &Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}

/// Reject non-2xx responses and decode the JSON body.
pub(crate) fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        tracing::debug!(%url, status = status.as_u16(), %body, "request rejected");
        return Err(AppError::Http { url: url.to_string(), status: status.as_u16() });
    }

    let body = response
        .text()
        .map_err(|e| AppError::RequestFailed { url: url.to_string(), details: e.to_string() })?;
    tracing::debug!(%url, %body, "response");
    serde_json::from_str(&body)
        .map_err(|e| AppError::InvalidResponse { url: url.to_string(), details: e.to_string() })
}

pub(crate) fn request_failed(url: &str, err: reqwest::Error) -> AppError {
    AppError::RequestFailed { url: url.to_string(), details: err.to_string() }
}
