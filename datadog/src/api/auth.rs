//! Credentials attached to every request

use std::fmt;

/// Header carrying the organization API key
pub const API_KEY_HEADER: &str = "DD-API-KEY";
/// Header carrying the application key
pub const APPLICATION_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// A single credential with an optional scheme prefix
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub prefix: String,
}

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// `prefix + " " + key` when a prefix is set, the bare key otherwise
    pub fn header_value(&self) -> String {
        if self.prefix.is_empty() {
            self.key.clone()
        } else {
            format!("{} {}", self.prefix, self.key)
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"<redacted>")
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Named credentials (`apiKeyAuth`, `appKeyAuth`); a missing entry simply
/// leaves its header off the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCredentials {
    pub api_key_auth: Option<ApiKey>,
    pub app_key_auth: Option<ApiKey>,
}

impl AuthCredentials {
    pub fn new(api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            api_key_auth: Some(ApiKey::new(api_key)),
            app_key_auth: Some(ApiKey::new(app_key)),
        }
    }

    pub fn with_api_key(mut self, key: ApiKey) -> Self {
        self.api_key_auth = Some(key);
        self
    }

    pub fn with_app_key(mut self, key: ApiKey) -> Self {
        self.app_key_auth = Some(key);
        self
    }

    /// Header name/value pairs for the credentials that are present
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        [
            (API_KEY_HEADER, self.api_key_auth.as_ref()),
            (APPLICATION_KEY_HEADER, self.app_key_auth.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, key)| key.map(|k| (name, k.header_value())))
    }
}
