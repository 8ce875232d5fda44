//! Layered configuration: `olx.toml`, then environment, then command-line flags.

use std::fs;
use std::path::Path;

use url::Url;

use crate::domain::config::parse_config_content;
use crate::domain::{AppError, CONFIG_FILE, OlxConfig};

pub const CMS_URL_VAR: &str = "OLX_CMS_URL";
pub const CLIENT_ID_VAR: &str = "OLX_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "OLX_CLIENT_SECRET";

/// CMS settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CmsOverrides {
    pub url: Option<Url>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Load `olx.toml` from `root` (defaults if absent) and apply environment overrides.
pub fn load_config(root: &Path) -> Result<OlxConfig, AppError> {
    let path = root.join(CONFIG_FILE);
    let mut config = if path.is_file() {
        tracing::debug!(path = %path.display(), "loading config");
        parse_config_content(&fs::read_to_string(&path)?)?
    } else {
        OlxConfig::default()
    };
    apply_env(&mut config)?;
    Ok(config)
}

/// Load the configuration and layer command-line values on top.
pub fn load_with_overrides(root: &Path, overrides: CmsOverrides) -> Result<OlxConfig, AppError> {
    let mut config = load_config(root)?;
    if let Some(url) = overrides.url {
        config.cms.url = Some(url);
    }
    if let Some(client_id) = overrides.client_id {
        config.cms.client_id = Some(client_id);
    }
    if let Some(client_secret) = overrides.client_secret {
        config.cms.client_secret = Some(client_secret);
    }
    Ok(config)
}

fn apply_env(config: &mut OlxConfig) -> Result<(), AppError> {
    if let Some(raw) = env_value(CMS_URL_VAR) {
        let url = Url::parse(&raw)
            .map_err(|e| AppError::config_error(format!("Invalid {}: {}", CMS_URL_VAR, e)))?;
        config.cms.url = Some(url);
    }
    if let Some(client_id) = env_value(CLIENT_ID_VAR) {
        config.cms.client_id = Some(client_id);
    }
    if let Some(client_secret) = env_value(CLIENT_SECRET_VAR) {
        config.cms.client_secret = Some(client_secret);
    }
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
