//! `olx.toml` configuration model.

use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, PollPolicy};

/// Config file looked up in the course root.
pub const CONFIG_FILE: &str = "olx.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OlxConfig {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub upload: PollPolicy,
}

/// Studio (CMS) endpoint and client credentials.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CmsConfig {
    /// Base URL, e.g. `https://studio.example.com`.
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self { url: None, client_id: None, client_secret: None, timeout_secs: default_timeout() }
    }
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CmsConfig {
    /// The configured base URL, or an error naming how to set it.
    pub fn require_url(&self) -> Result<&Url, AppError> {
        self.url.as_ref().ok_or_else(|| {
            AppError::config_error(
                "No CMS URL configured. Set [cms].url in olx.toml, OLX_CMS_URL, or pass --url",
            )
        })
    }
}

fn default_timeout() -> u64 {
    60
}

/// Parse `olx.toml` content.
pub fn parse_config_content(content: &str) -> Result<OlxConfig, AppError> {
    let config: OlxConfig = toml::from_str(content)?;
    if config.upload.max_attempts == 0 {
        return Err(AppError::config_error("[upload].max_attempts must be at least 1"));
    }
    Ok(config)
}
