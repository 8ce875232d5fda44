//! `token`: fetch a bearer token for the configured CMS.

use crate::domain::{AppError, CmsConfig};
use crate::services::{HttpTokenClient, require_credentials};

/// Credentials are checked before the CMS URL, so a missing ID is reported first.
pub fn execute(cms: &CmsConfig) -> Result<String, AppError> {
    require_credentials(cms.client_id.as_deref(), cms.client_secret.as_deref())?;
    let client = HttpTokenClient::from_config(cms)?;
    client.fetch_token(cms.client_id.as_deref(), cms.client_secret.as_deref())
}
