//! Provider data shared by every resource instance

use crate::api::{AuthCredentials, Client};

/// Configured API client plus the credentials it was built with.
/// Read-only once the provider is configured.
#[derive(Clone)]
pub struct DatadogProviderData {
    pub client: Client,
}

impl DatadogProviderData {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn auth(&self) -> &AuthCredentials {
        self.client.auth()
    }
}
