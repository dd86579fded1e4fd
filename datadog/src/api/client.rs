use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::auth::AuthCredentials;
use super::error::{ApiError, ApiFailure};
use super::response::{RawResponse, ResponseMeta};

pub const DEFAULT_API_URL: &str = "https://api.datadoghq.com";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client tuning
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `None` leaves requests without a deadline
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_idle_connections: usize,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(60)),
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(90),
            max_idle_connections: 10,
            user_agent: format!("terraform-provider-datadog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    fn build_http_client(&self) -> Result<reqwest::Client, ApiError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(self.idle_timeout)
            .pool_max_idle_per_host(self.max_idle_connections)
            .user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(ApiError::Transport)
    }
}

/// Datadog API client
///
/// Cheap to clone; holds no mutable state, so concurrent requests are
/// independent of each other.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    auth: AuthCredentials,
}

impl Client {
    /// Create a new API client with default configuration
    pub fn new(base_url: &str, auth: AuthCredentials) -> Result<Self, ApiError> {
        Self::with_config(base_url, auth, ClientConfig::default())
    }

    pub fn with_config(
        base_url: &str,
        auth: AuthCredentials,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }

        let http_client = config.build_http_client()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: base_url.trim_end_matches('/').to_string(),
                auth,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn auth(&self) -> &AuthCredentials {
        &self.inner.auth
    }

    /// Compose a request for `path` relative to the base URL.
    ///
    /// Always JSON in both directions; credential headers are added for the
    /// entries present in [`AuthCredentials`].
    pub fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let raw_url = format!("{}{}", self.inner.base_url, path);
        let url = Url::parse(&raw_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw_url, e)))?;

        let mut builder = self
            .inner
            .http_client
            .request(method, url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        for (name, value) in self.inner.auth.headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiError::InvalidHeader(name))?;
            let value = HeaderValue::from_str(&value).map_err(|_| ApiError::InvalidHeader(name))?;
            builder = builder.header(header_name, value);
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Serialize)?;
            builder = builder.body(bytes);
        }

        builder.build().map_err(ApiError::Transport)
    }

    /// Send one request and classify the response.
    ///
    /// Status >= 300 becomes [`ApiError::Api`] holding the raw body; a body
    /// that cannot be read in full becomes [`ApiError::BodyRead`] with the
    /// status and headers already received.
    pub async fn send_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body)?;
        tracing::debug!("{} request to: {}", request.method(), request.url());

        let response = self
            .inner
            .http_client
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;

        let meta = ResponseMeta::from_response(&response);
        tracing::debug!("Response status: {}", meta.status);

        // bytes() consumes the response, releasing the connection on both arms
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(source) => return Err(ApiError::BodyRead { meta, source }),
        };

        if meta.status.as_u16() >= 300 {
            tracing::debug!(
                "API error response ({}): {}",
                meta.status_text(),
                String::from_utf8_lossy(&body)
            );
            return Err(ApiFailure::new(meta, body).into());
        }

        Ok(RawResponse { meta, body })
    }

    /// Org config operations (`/api/v2/org_configs`)
    pub fn org_configs(&self) -> super::org_config::OrgConfigApi<'_> {
        super::org_config::OrgConfigApi::new(self)
    }

    /// Organization operations (`/api/v1/org`)
    pub fn organizations(&self) -> super::organizations::OrganizationsApi<'_> {
        super::organizations::OrganizationsApi::new(self)
    }
}
