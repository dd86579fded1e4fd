//! Datadog HTTP API client

pub mod auth;
pub mod client;
pub mod error;
pub mod org_config;
pub mod organizations;
pub mod response;
pub mod validate;

pub use auth::{ApiKey, AuthCredentials};
pub use client::{Client, ClientConfig, DEFAULT_API_URL};
pub use error::{ApiError, ApiErrorResponse, ApiFailure};
pub use org_config::{OrgConfig, OrgConfigApi, SecurityContacts, ORG_CONFIG_TYPE, SECURITY_CONTACTS};
pub use organizations::{
    Organization, OrganizationSettings, OrganizationsApi, SamlAutocreateUsersDomains, SamlToggle,
    ACCESS_ROLES,
};
pub use response::{RawResponse, ResponseMeta};
