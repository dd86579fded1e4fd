//! `datadog_organization_settings` resource
//!
//! The organization always exists, so create adopts the first organization
//! visible to the credentials and then applies the configured settings.
//! Security contacts live in a separate org config and are only written
//! when the configured list differs from the one recorded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tfplug::{
    import_state_passthrough, AttributeBuilder, AttributeType, BlockBuilder, Diagnostic,
    Diagnostics, NestedBlock, Resource, ResourceData, ResourceWithImportState, Schema,
    SchemaBuilder, StringInSliceValidator, StringLengthValidator,
};

use super::client_error;
use crate::api::{
    ApiError, Client, Organization, OrganizationSettings, SamlAutocreateUsersDomains, SamlToggle,
    ACCESS_ROLES, SECURITY_CONTACTS,
};
use crate::validators;
use crate::DatadogProviderData;

pub const TYPE_NAME: &str = "datadog_organization_settings";

const DEFAULT_ACCESS_ROLE: &str = "st";

pub struct OrganizationSettingsResource {
    provider_data: Arc<DatadogProviderData>,
}

impl OrganizationSettingsResource {
    pub fn new(provider_data: Arc<DatadogProviderData>) -> Self {
        Self { provider_data }
    }

    fn client(&self) -> &Client {
        &self.provider_data.client
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Provides a Datadog Organization resource. This can be used to manage your Datadog organization's settings.")
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Name for Organization.")
                    .optional()
                    .validator(StringLengthValidator::between(1, 32))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("public_id", AttributeType::String)
                    .description("The `public_id` of the organization you are operating within.")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("description", AttributeType::String)
                    .description("Description of the organization.")
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new(
                    SECURITY_CONTACTS,
                    AttributeType::List(Box::new(AttributeType::String)),
                )
                .description("List of emails used for security event notifications from the organization.")
                .optional()
                .computed()
                .element_validator(validators::basic_email())
                .build(),
            )
            .block(
                NestedBlock::list("settings", settings_block())
                    .max_items(1)
                    .computed(),
            )
            .build()
    }

    async fn read_security_contacts(&self, data: &mut ResourceData) -> Diagnostics {
        match self.client().org_configs().security_contacts().await {
            Ok(contacts) => set_security_contacts(data, contacts),
            Err(e) => security_contacts_error("error getting security_contacts", &e),
        }
    }

    async fn update_security_contacts(&self, data: &mut ResourceData) -> Diagnostics {
        // A new resource has no recorded value to compare against yet
        if data.is_new_resource() {
            let diags = self.read_security_contacts(data).await;
            if diags.has_error() {
                return diags;
            }
        }

        if !data.has_change(SECURITY_CONTACTS) {
            return Diagnostics::new();
        }

        let contacts: Vec<String> = match data.planned_as(SECURITY_CONTACTS) {
            Ok(Some(contacts)) => contacts,
            Ok(None) => return Diagnostics::new(),
            Err(e) => {
                return Diagnostic::error("invalid security_contacts", e.to_string()).into()
            }
        };

        tracing::debug!("Updating {} security contacts", contacts.len());
        match self
            .client()
            .org_configs()
            .update_security_contacts(contacts)
            .await
        {
            Ok(contacts) => set_security_contacts(data, contacts),
            Err(e) => security_contacts_error("error setting security_contacts", &e),
        }
    }
}

#[async_trait]
impl Resource for OrganizationSettingsResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Self::schema_static()
    }

    async fn create(&self, data: &mut ResourceData) -> Diagnostics {
        let orgs = match self.client().organizations().list().await {
            Ok(orgs) => orgs,
            Err(e) => return client_error("error getting organization", &e).into(),
        };

        // Only the first organization is managed
        let Some(public_id) = orgs.into_iter().next().and_then(|org| org.public_id) else {
            return Diagnostic::error(
                "no organizations available",
                "The configured credentials cannot see any organization.",
            )
            .into();
        };

        tracing::debug!("Managing settings of organization {}", public_id);
        data.set_id(public_id);
        self.update(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Diagnostics {
        let org = match self.client().organizations().get(data.id()).await {
            Ok(org) => org,
            Err(e) if e.is_not_found() => {
                tracing::warn!("Organization {} not found, removing from state", data.id());
                data.clear_id();
                return Diagnostics::new();
            }
            Err(e) => return client_error("error getting organization", &e).into(),
        };

        let mut diags = update_organization_state(data, &org);
        diags.extend(self.read_security_contacts(data).await);
        diags
    }

    async fn update(&self, data: &mut ResourceData) -> Diagnostics {
        let request = match build_update_organization(data) {
            Ok(org) => org,
            Err(e) => return Diagnostic::error("invalid organization settings", e.to_string()).into(),
        };

        let org = match self
            .client()
            .organizations()
            .update(data.id(), &request)
            .await
        {
            Ok(org) => org,
            Err(e) => return client_error("error updating organization", &e).into(),
        };

        let mut diags = update_organization_state(data, &org);
        diags.extend(self.update_security_contacts(data).await);
        diags
    }

    async fn delete(&self, _data: &mut ResourceData) -> Diagnostics {
        Diagnostic::warning(
            "Cannot delete organization settings.",
            "Remove organization by contacting support (https://docs.datadoghq.com/help/).",
        )
        .into()
    }
}

#[async_trait]
impl ResourceWithImportState for OrganizationSettingsResource {
    async fn import_state(&self, id: &str) -> (Option<ResourceData>, Diagnostics) {
        import_state_passthrough(self, id).await
    }
}

fn settings_block() -> tfplug::Block {
    BlockBuilder::new()
        .description("Organization settings")
        .attribute(
            AttributeBuilder::new("private_widget_share", AttributeType::Bool)
                .description("Whether or not the organization users can share widgets outside of Datadog.")
                .optional()
                .default(false)
                .build(),
        )
        .block(
            NestedBlock::list(
                "saml",
                enabled_block("Whether or not SAML is enabled for this organization."),
            )
            .min_items(1)
            .max_items(1),
        )
        .attribute(
            AttributeBuilder::new("saml_autocreate_access_role", AttributeType::String)
                .description("The access role of the user. Options are `st` (standard user), `adm` (admin user), or `ro` (read-only user). Allowed enum values: `st`, `adm` , `ro`, `ERROR`")
                .optional()
                .default(DEFAULT_ACCESS_ROLE)
                .validator(StringInSliceValidator::new(ACCESS_ROLES))
                .build(),
        )
        .block(
            NestedBlock::list(
                "saml_autocreate_users_domains",
                BlockBuilder::new()
                    .attribute(
                        AttributeBuilder::new(
                            "domains",
                            AttributeType::List(Box::new(AttributeType::String)),
                        )
                        .description("List of domains where the SAML automated user creation is enabled.")
                        .optional()
                        .build(),
                    )
                    .attribute(
                        AttributeBuilder::new("enabled", AttributeType::Bool)
                            .description("Whether or not the automated user creation based on SAML domain is enabled.")
                            .optional()
                            .default(false)
                            .build(),
                    )
                    .build(),
            )
            .min_items(1)
            .max_items(1),
        )
        .attribute(
            AttributeBuilder::new("saml_can_be_enabled", AttributeType::Bool)
                .description("Whether or not SAML can be enabled for this organization.")
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("saml_idp_endpoint", AttributeType::String)
                .description("Identity provider endpoint for SAML authentication.")
                .computed()
                .build(),
        )
        .block(
            NestedBlock::list(
                "saml_idp_initiated_login",
                enabled_block("Whether or not a SAML identity provider metadata file was provided to the Datadog organization."),
            )
            .min_items(1)
            .max_items(1),
        )
        .attribute(
            AttributeBuilder::new("saml_idp_metadata_uploaded", AttributeType::Bool)
                .description("Whether or not a SAML identity provider metadata file was provided to the Datadog organization.")
                .computed()
                .build(),
        )
        .attribute(
            AttributeBuilder::new("saml_login_url", AttributeType::String)
                .description("URL for SAML logging.")
                .computed()
                .build(),
        )
        .block(
            NestedBlock::list(
                "saml_strict_mode",
                enabled_block("Whether or not the SAML strict mode is enabled. If true, all users must log in with SAML."),
            )
            .min_items(1)
            .max_items(1),
        )
        .build()
}

fn enabled_block(description: &str) -> tfplug::Block {
    BlockBuilder::new()
        .attribute(
            AttributeBuilder::new("enabled", AttributeType::Bool)
                .description(description)
                .optional()
                .default(false)
                .build(),
        )
        .build()
}

/// `settings` block as configured; computed members are ignored
#[derive(Debug, Default, Deserialize)]
struct SettingsConfig {
    private_widget_share: Option<bool>,
    saml: Option<Vec<ToggleConfig>>,
    saml_autocreate_access_role: Option<String>,
    saml_autocreate_users_domains: Option<Vec<UsersDomainsConfig>>,
    saml_idp_initiated_login: Option<Vec<ToggleConfig>>,
    saml_strict_mode: Option<Vec<ToggleConfig>>,
}

#[derive(Debug, Default, Deserialize)]
struct ToggleConfig {
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct UsersDomainsConfig {
    domains: Option<Vec<String>>,
    enabled: Option<bool>,
}

impl ToggleConfig {
    fn into_api(self) -> SamlToggle {
        SamlToggle {
            enabled: self.enabled.unwrap_or(false),
        }
    }
}

impl SettingsConfig {
    fn into_api(self) -> OrganizationSettings {
        OrganizationSettings {
            private_widget_share: Some(self.private_widget_share.unwrap_or(false)),
            saml: first(self.saml).map(ToggleConfig::into_api),
            saml_autocreate_access_role: Some(
                self.saml_autocreate_access_role
                    .unwrap_or_else(|| DEFAULT_ACCESS_ROLE.to_string()),
            ),
            saml_autocreate_users_domains: first(self.saml_autocreate_users_domains).map(
                |domains| SamlAutocreateUsersDomains {
                    domains: domains.domains.unwrap_or_default(),
                    enabled: domains.enabled.unwrap_or(false),
                },
            ),
            saml_idp_initiated_login: first(self.saml_idp_initiated_login)
                .map(ToggleConfig::into_api),
            saml_strict_mode: first(self.saml_strict_mode).map(ToggleConfig::into_api),
            ..Default::default()
        }
    }
}

/// `settings` block as stored in state
#[derive(Debug, Serialize)]
struct SettingsState {
    private_widget_share: bool,
    saml: Vec<SamlToggle>,
    saml_autocreate_access_role: String,
    saml_autocreate_users_domains: Vec<SamlAutocreateUsersDomains>,
    saml_can_be_enabled: bool,
    saml_idp_endpoint: String,
    saml_idp_initiated_login: Vec<SamlToggle>,
    saml_idp_metadata_uploaded: bool,
    saml_login_url: String,
    saml_strict_mode: Vec<SamlToggle>,
}

impl From<&OrganizationSettings> for SettingsState {
    fn from(settings: &OrganizationSettings) -> Self {
        Self {
            private_widget_share: settings.private_widget_share.unwrap_or(false),
            saml: settings.saml.into_iter().collect(),
            saml_autocreate_access_role: settings
                .saml_autocreate_access_role
                .clone()
                .unwrap_or_else(|| DEFAULT_ACCESS_ROLE.to_string()),
            saml_autocreate_users_domains: settings
                .saml_autocreate_users_domains
                .iter()
                .cloned()
                .collect(),
            saml_can_be_enabled: settings.saml_can_be_enabled.unwrap_or(false),
            saml_idp_endpoint: settings.saml_idp_endpoint.clone().unwrap_or_default(),
            saml_idp_initiated_login: settings.saml_idp_initiated_login.into_iter().collect(),
            saml_idp_metadata_uploaded: settings.saml_idp_metadata_uploaded.unwrap_or(false),
            saml_login_url: settings.saml_login_url.clone().unwrap_or_default(),
            saml_strict_mode: settings.saml_strict_mode.into_iter().collect(),
        }
    }
}

fn first<T>(items: Option<Vec<T>>) -> Option<T> {
    items.and_then(|items| items.into_iter().next())
}

/// Organization update body built from the configured values
fn build_update_organization(data: &ResourceData) -> tfplug::Result<Organization> {
    let mut org = Organization::default();

    if let Some(name) = data.get_ok("name").and_then(Value::as_str) {
        org.name = Some(name.to_string());
    }

    let settings: Option<Vec<SettingsConfig>> = data.get_as("settings")?;
    if let Some(settings) = first(settings) {
        org.settings = Some(settings.into_api());
    }

    Ok(org)
}

fn update_organization_state(data: &mut ResourceData, org: &Organization) -> Diagnostics {
    match set_organization_state(data, org) {
        Ok(()) => Diagnostics::new(),
        Err(e) => Diagnostic::error("error setting organization state", e.to_string()).into(),
    }
}

fn set_organization_state(data: &mut ResourceData, org: &Organization) -> tfplug::Result<()> {
    if let Some(name) = &org.name {
        data.set("name", name)?;
    }
    if let Some(public_id) = &org.public_id {
        data.set("public_id", public_id)?;
    }
    if let Some(description) = &org.description {
        data.set("description", description)?;
    }
    if let Some(settings) = &org.settings {
        data.set("settings", vec![SettingsState::from(settings)])?;
    }
    Ok(())
}

fn set_security_contacts(data: &mut ResourceData, contacts: Vec<String>) -> Diagnostics {
    match data.set(SECURITY_CONTACTS, contacts) {
        Ok(()) => Diagnostics::new(),
        Err(e) => Diagnostic::error("error setting security_contacts", e.to_string()).into(),
    }
}

fn security_contacts_error(context: &str, error: &ApiError) -> Diagnostics {
    match error {
        ApiError::Decode(source) => Diagnostic::error(
            format!("error parsing security_contacts: {}", source),
            String::new(),
        )
        .into(),
        other => client_error(context, other).into(),
    }
}
