//! Org config API (`/api/v2/org_configs/{name}`)
//!
//! Every org config is a single value wrapped in the same envelope:
//! `{"data": {"type": "org_configs", "attributes": {"value": ...}}}`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, Client};

/// Envelope discriminator sent on writes
pub const ORG_CONFIG_TYPE: &str = "org_configs";

/// Name of the org config holding security contact emails
pub const SECURITY_CONTACTS: &str = "security_contacts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgConfig<T> {
    pub data: OrgConfigData<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgConfigData<T> {
    #[serde(rename = "type")]
    pub config_type: String,
    pub attributes: OrgConfigAttributes<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrgConfigAttributes<T> {
    pub value: T,
}

pub type SecurityContacts = OrgConfig<Vec<String>>;

impl<T> OrgConfig<T> {
    pub fn new(config_type: impl Into<String>, value: T) -> Self {
        Self {
            data: OrgConfigData {
                config_type: config_type.into(),
                attributes: OrgConfigAttributes { value },
            },
        }
    }

    pub fn value(&self) -> &T {
        &self.data.attributes.value
    }

    pub fn into_value(self) -> T {
        self.data.attributes.value
    }
}

pub struct OrgConfigApi<'a> {
    client: &'a Client,
}

impl<'a> OrgConfigApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn path(name: &str) -> String {
        format!("/api/v2/org_configs/{}", name)
    }

    /// GET /api/v2/org_configs/{name}
    pub async fn get<T>(&self, name: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .send_request::<()>(Method::GET, &Self::path(name), None)
            .await?;
        let config: OrgConfig<T> = response.json()?;
        Ok(config.into_value())
    }

    /// PATCH /api/v2/org_configs/{name}
    ///
    /// Returns the value echoed back by the server.
    pub async fn update<T>(&self, name: &str, value: T) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = OrgConfig::new(ORG_CONFIG_TYPE, value);
        let response = self
            .client
            .send_request(Method::PATCH, &Self::path(name), Some(&body))
            .await?;
        let config: OrgConfig<T> = response.json()?;
        Ok(config.into_value())
    }

    pub async fn security_contacts(&self) -> Result<Vec<String>, ApiError> {
        self.get(SECURITY_CONTACTS).await
    }

    pub async fn update_security_contacts(
        &self,
        contacts: Vec<String>,
    ) -> Result<Vec<String>, ApiError> {
        self.update(SECURITY_CONTACTS, contacts).await
    }
}
