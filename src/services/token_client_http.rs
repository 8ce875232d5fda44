//! Client-credentials token exchange against the CMS OAuth2 endpoint.

use std::time::Instant;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, CmsConfig};
use crate::services::cms_http::{build_client, endpoint, read_json, request_failed};

const TOKEN_PATH: &str = "/oauth2/access_token";

/// Fetches JWT bearer tokens for the import API.
#[derive(Debug, Clone)]
pub struct HttpTokenClient {
    url: Url,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client ID and secret, or the error for whichever is missing first.
///
/// Empty strings count as missing.
pub fn require_credentials<'a>(
    client_id: Option<&'a str>,
    client_secret: Option<&'a str>,
) -> Result<(&'a str, &'a str), AppError> {
    let client_id = client_id.filter(|s| !s.is_empty()).ok_or(AppError::MissingClientId)?;
    let client_secret =
        client_secret.filter(|s| !s.is_empty()).ok_or(AppError::MissingClientSecret)?;
    Ok((client_id, client_secret))
}

impl HttpTokenClient {
    pub fn new(url: Url, timeout_secs: u64) -> Result<Self, AppError> {
        Ok(Self { url, client: build_client(timeout_secs)? })
    }

    pub fn from_config(config: &CmsConfig) -> Result<Self, AppError> {
        Self::new(config.require_url()?.clone(), config.timeout_secs)
    }

    /// Exchange the client credentials for an access token.
    ///
    /// Missing credentials are reported before any request is sent.
    pub fn fetch_token(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<String, AppError> {
        let (client_id, client_secret) = require_credentials(client_id, client_secret)?;
        let url = endpoint(&self.url, TOKEN_PATH);

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("token_type", "jwt"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .map_err(|e| request_failed(&url, e))?;
        tracing::debug!(%url, elapsed_ms = started.elapsed().as_millis() as u64, "token request finished");

        let token: TokenResponse = read_json(response, &url)?;
        Ok(token.access_token)
    }
}
