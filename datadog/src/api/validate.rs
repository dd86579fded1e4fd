//! Key validation (`/api/v1/validate`)

use reqwest::Method;
use serde::Deserialize;

use super::{ApiError, Client};

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    valid: bool,
}

impl Client {
    /// Check that the configured API key is accepted.
    ///
    /// An invalid key usually surfaces as a 403 from the server rather than
    /// `{"valid": false}`; both are reported to the caller.
    pub async fn validate_keys(&self) -> Result<bool, ApiError> {
        let response = self
            .send_request::<()>(Method::GET, "/api/v1/validate", None)
            .await?;
        let validation: ValidateResponse = response.json()?;
        Ok(validation.valid)
    }
}
