//! Terraform provider for Datadog organization settings

pub mod api;
pub mod provider_data;
pub mod resources;
pub mod validators;

pub use provider_data::DatadogProviderData;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tfplug::{
    AttributeBuilder, AttributeType, Config, Diagnostics, Provider, Resource, Schema,
    SchemaBuilder, TfplugError,
};

use api::{AuthCredentials, Client, ClientConfig, DEFAULT_API_URL};
use resources::organization_settings::{self, OrganizationSettingsResource};

const DEFAULT_HTTP_CLIENT_TIMEOUT_SECS: u64 = 60;

pub struct DatadogProvider {
    provider_data: Option<Arc<DatadogProviderData>>,
}

impl Default for DatadogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DatadogProvider {
    pub fn new() -> Self {
        Self {
            provider_data: None,
        }
    }

    pub fn provider_data(&self) -> Option<&Arc<DatadogProviderData>> {
        self.provider_data.as_ref()
    }

    pub fn schema_static() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::new("api_key", AttributeType::String)
                    .description("(Required unless validate is false) Datadog API key. This can also be set via the DD_API_KEY environment variable.")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("app_key", AttributeType::String)
                    .description("(Required unless validate is false) Datadog APP key. This can also be set via the DD_APP_KEY environment variable.")
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("api_url", AttributeType::String)
                    .description("The API URL. This can also be set via the DD_HOST environment variable. Defaults to https://api.datadoghq.com.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("validate", AttributeType::Bool)
                    .description("Enables validation of the provided API key during provider initialization. Defaults to true. This can also be set via the DD_VALIDATE environment variable.")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("http_client_timeout", AttributeType::Number)
                    .description("The HTTP request timeout in seconds. 0 disables the timeout. Defaults to 60.")
                    .optional()
                    .validator(validators::timeout_seconds())
                    .build(),
            )
            .build()
    }
}

/// First non-empty value among the config attribute and the env vars
fn config_string(config: &Config, key: &str, env_vars: &[&str]) -> Option<String> {
    config
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            env_vars
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|v| !v.is_empty())
        })
}

#[async_trait]
impl Provider for DatadogProvider {
    fn type_name(&self) -> &str {
        "datadog"
    }

    fn schema(&self) -> Schema {
        Self::schema_static()
    }

    async fn configure(&mut self, config: Config) -> Diagnostics {
        let mut diags = Self::schema_static().validate(&config);
        if diags.has_error() {
            return diags;
        }

        let api_key = config_string(&config, "api_key", &["DD_API_KEY", "DATADOG_API_KEY"]);
        let app_key = config_string(&config, "app_key", &["DD_APP_KEY", "DATADOG_APP_KEY"]);
        let api_url = config_string(&config, "api_url", &["DD_HOST", "DATADOG_HOST"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let validate = config
            .get("validate")
            .and_then(Value::as_bool)
            .or_else(|| {
                std::env::var("DD_VALIDATE")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok())
            })
            .unwrap_or(true);

        // Validated above as a non-negative whole number; 0 disables the deadline
        let timeout = match config.get("http_client_timeout").and_then(Value::as_f64) {
            Some(secs) if secs == 0.0 => None,
            Some(secs) => Some(Duration::from_secs(secs as u64)),
            None => Some(Duration::from_secs(DEFAULT_HTTP_CLIENT_TIMEOUT_SECS)),
        };

        let (api_key, app_key) = match (api_key, app_key) {
            (Some(api_key), Some(app_key)) => (api_key, app_key),
            (api_key, app_key) => {
                if api_key.is_none() {
                    diags.add_error(
                        "api_key is required (set in provider config or DD_API_KEY env var)",
                        "",
                    );
                }
                if app_key.is_none() {
                    diags.add_error(
                        "app_key is required (set in provider config or DD_APP_KEY env var)",
                        "",
                    );
                }
                return diags;
            }
        };

        let client_config = ClientConfig {
            request_timeout: timeout,
            ..ClientConfig::default()
        };
        let client = match Client::with_config(
            &api_url,
            AuthCredentials::new(api_key, app_key),
            client_config,
        ) {
            Ok(client) => client,
            Err(e) => {
                diags.add_error(format!("Failed to create API client: {}", e), "");
                return diags;
            }
        };

        if validate {
            tracing::debug!("Validating API key against {}", client.base_url());
            match client.validate_keys().await {
                Ok(true) => {}
                Ok(false) => {
                    diags.add_error(
                        "Invalid or missing credentials provided to the Datadog provider",
                        "The API key was rejected by /api/v1/validate.",
                    );
                    return diags;
                }
                Err(e) => {
                    diags.push(resources::client_error("Failed to validate API key", &e));
                    return diags;
                }
            }
        }

        self.provider_data = Some(Arc::new(DatadogProviderData::new(client)));
        diags
    }

    fn create_resource(&self, name: &str) -> tfplug::Result<Box<dyn Resource>> {
        let provider_data = self
            .provider_data
            .as_ref()
            .ok_or(TfplugError::ProviderNotConfigured)?;

        match name {
            organization_settings::TYPE_NAME => Ok(Box::new(OrganizationSettingsResource::new(
                provider_data.clone(),
            ))),
            _ => Err(TfplugError::ResourceNotFound(name.to_string())),
        }
    }

    fn resource_schemas(&self) -> HashMap<String, Schema> {
        static SCHEMAS: std::sync::OnceLock<HashMap<String, Schema>> = std::sync::OnceLock::new();

        SCHEMAS
            .get_or_init(|| {
                let mut schemas = HashMap::new();
                schemas.insert(
                    organization_settings::TYPE_NAME.to_string(),
                    OrganizationSettingsResource::schema_static(),
                );
                schemas
            })
            .clone()
    }
}
