//! Organizations API (`/api/v1/org`)

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiError, Client};

/// Roles accepted for `saml_autocreate_access_role`
pub const ACCESS_ROLES: [&str; 4] = ["st", "adm", "ro", "ERROR"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<OrganizationSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_widget_share: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml: Option<SamlToggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_autocreate_access_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_autocreate_users_domains: Option<SamlAutocreateUsersDomains>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_can_be_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_idp_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_idp_initiated_login: Option<SamlToggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_idp_metadata_uploaded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_login_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saml_strict_mode: Option<SamlToggle>,
}

/// `{"enabled": bool}` sub-object shared by several SAML settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlToggle {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlAutocreateUsersDomains {
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// Response from GET /api/v1/org
#[derive(Debug, Deserialize)]
struct OrganizationListResponse {
    #[serde(default)]
    orgs: Vec<Organization>,
}

/// Response from GET/PUT /api/v1/org/{public_id}
#[derive(Debug, Deserialize)]
struct OrganizationResponse {
    org: Organization,
}

pub struct OrganizationsApi<'a> {
    client: &'a Client,
}

impl<'a> OrganizationsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /api/v1/org
    pub async fn list(&self) -> Result<Vec<Organization>, ApiError> {
        let response = self
            .client
            .send_request::<()>(Method::GET, "/api/v1/org", None)
            .await?;
        let list: OrganizationListResponse = response.json()?;
        Ok(list.orgs)
    }

    /// GET /api/v1/org/{public_id}
    pub async fn get(&self, public_id: &str) -> Result<Organization, ApiError> {
        let path = format!("/api/v1/org/{}", public_id);
        let response = self.client.send_request::<()>(Method::GET, &path, None).await?;
        let org: OrganizationResponse = response.json()?;
        Ok(org.org)
    }

    /// PUT /api/v1/org/{public_id}
    pub async fn update(
        &self,
        public_id: &str,
        org: &Organization,
    ) -> Result<Organization, ApiError> {
        let path = format!("/api/v1/org/{}", public_id);
        let response = self.client.send_request(Method::PUT, &path, Some(org)).await?;
        let org: OrganizationResponse = response.json()?;
        Ok(org.org)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthCredentials;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: &str) -> Client {
        Client::new(url, AuthCredentials::new("api", "app")).unwrap()
    }

    #[test]
    fn organization_skips_unset_fields() {
        let org = Organization {
            name: Some("acme".to_string()),
            settings: Some(OrganizationSettings {
                saml: Some(SamlToggle { enabled: true }),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&org).unwrap(),
            json!({"name": "acme", "settings": {"saml": {"enabled": true}}})
        );
    }

    #[tokio::test]
    async fn list_returns_orgs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/org")
            .with_status(200)
            .with_body(
                r#"{"orgs":[{"name":"acme","public_id":"abc123","description":"d","created":"2020-01-01"}]}"#,
            )
            .create_async()
            .await;

        let orgs = client(&server.url()).organizations().list().await.unwrap();

        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].public_id.as_deref(), Some("abc123"));
        assert_eq!(orgs[0].name.as_deref(), Some("acme"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_decodes_settings() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/org/abc123")
            .with_status(200)
            .with_body(
                json!({
                    "org": {
                        "name": "acme",
                        "public_id": "abc123",
                        "settings": {
                            "private_widget_share": true,
                            "saml": {"enabled": false},
                            "saml_autocreate_access_role": "ro",
                            "saml_autocreate_users_domains": {"domains": ["x.com"], "enabled": true},
                            "saml_login_url": "https://login"
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let org = client(&server.url()).organizations().get("abc123").await.unwrap();
        let settings = org.settings.unwrap();

        assert_eq!(settings.private_widget_share, Some(true));
        assert_eq!(settings.saml, Some(SamlToggle { enabled: false }));
        assert_eq!(settings.saml_autocreate_access_role.as_deref(), Some("ro"));
        assert_eq!(
            settings.saml_autocreate_users_domains.unwrap().domains,
            vec!["x.com".to_string()]
        );
        assert_eq!(settings.saml_login_url.as_deref(), Some("https://login"));
        assert!(settings.saml_strict_mode.is_none());
    }

    #[tokio::test]
    async fn get_reports_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/org/missing")
            .with_status(404)
            .with_body(r#"{"errors":["Not found"]}"#)
            .create_async()
            .await;

        let error = client(&server.url())
            .organizations()
            .get("missing")
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn update_puts_org_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v1/org/abc123")
            .match_body(Matcher::Json(json!({"name": "renamed"})))
            .with_status(200)
            .with_body(r#"{"org":{"name":"renamed","public_id":"abc123"}}"#)
            .expect(1)
            .create_async()
            .await;

        let org = Organization {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let updated = client(&server.url())
            .organizations()
            .update("abc123", &org)
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("renamed"));
        mock.assert_async().await;
    }
}
