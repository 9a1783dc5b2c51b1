//! Main panel API client implementation.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use cfpanel_core::{PanelError, Reply, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Cookie-session client for the panel backend
#[derive(Clone)]
pub struct PanelClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    cookies: Arc<Jar>,
    timeout: Duration,
}

impl PanelClient {
    /// Create a client for the given backend using default settings
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        PanelClientBuilder::new(base_url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> PanelClientBuilder {
        PanelClientBuilder::new(base_url)
    }

    /// Login, logout and password endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Temporary tunnel and node endpoints
    #[must_use]
    pub fn tunnels(&self) -> TunnelApi<'_> {
        TunnelApi::new(self)
    }

    /// Zone listing and registration endpoints
    #[must_use]
    pub fn zones(&self) -> ZoneApi<'_> {
        ZoneApi::new(self)
    }

    /// Saved binding endpoints
    #[must_use]
    pub fn bindings(&self) -> BindingApi<'_> {
        BindingApi::new(self)
    }

    /// Backend health endpoints
    #[must_use]
    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    /// The backend base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Current cookies for the backend as a `Cookie` header value
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.inner
            .cookies
            .cookies(&self.inner.base_url)
            .and_then(|value| value.to_str().ok().map(String::from))
    }

    /// Load cookies saved from an earlier [`session_cookie`](Self::session_cookie)
    pub fn restore_session(&self, cookie_header: &str) {
        for pair in cookie_header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.inner.cookies.add_cookie_str(pair, &self.inner.base_url);
        }
    }

    /// Perform a GET request against an enveloped route
    pub(crate) async fn get_reply<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_reply(response).await
    }

    /// Perform a POST request with JSON body against an enveloped route
    pub(crate) async fn post_reply<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.handle_reply(response).await
    }

    /// Perform a GET request against a route that answers with plain JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(&e))?;
            serde_json::from_str(&body).map_err(PanelError::Json)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Self::status_error(status.as_u16(), body))
        }
    }

    /// Perform a bodyless POST, reporting only whether the status was a success
    pub(crate) async fn post_empty(&self, path: &str) -> Result<bool> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self
            .inner
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        Ok(response.status().is_success())
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| PanelError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Decode an enveloped reply.
    ///
    /// The backend sends `{ok:false, error}` bodies with 4xx/5xx statuses, so
    /// any JSON object is a reply regardless of status.
    async fn handle_reply<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Reply<T>> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.is_object() => Ok(Reply::from_value(value)),
            _ if (200..300).contains(&status) => Err(PanelError::Api {
                code: status,
                message: format!("expected a JSON object, got: {body}"),
            }),
            _ => Err(Self::status_error(status, body)),
        }
    }

    /// Convert a non-JSON error response to a PanelError
    fn status_error(status: u16, body: String) -> PanelError {
        match status {
            401 => PanelError::Unauthorized,
            404 => PanelError::NotFound { resource: body },
            429 => {
                warn!("Rate limited by panel backend");
                PanelError::RateLimited { retry_after: None }
            }
            _ => PanelError::Api {
                code: status,
                message: body,
            },
        }
    }

    fn transport_error(&self, error: &reqwest::Error) -> PanelError {
        warn!(error = %error, "request to panel backend failed");
        if error.is_timeout() {
            PanelError::Timeout(self.inner.timeout.as_secs())
        } else if error.is_connect() {
            PanelError::Connection(error.to_string())
        } else {
            PanelError::Http(error.to_string())
        }
    }
}

/// Builder for configuring a [`PanelClient`]
pub struct PanelClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    cookies: Option<Arc<Jar>>,
}

impl PanelClientBuilder {
    /// Create a new builder for the given backend
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a builder from a [`ClientConfig`]
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url,
            timeout: config.timeout,
            user_agent: config.user_agent,
            cookies: None,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Share a cookie jar with other clients
    #[must_use]
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookies = Some(jar);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PanelClient> {
        let base = if self.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            self.base_url
        };
        let base_url =
            Url::parse(&base).map_err(|e| PanelError::InvalidUrl(format!("{base}: {e}")))?;
        let cookies = self.cookies.unwrap_or_default();

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .cookie_provider(Arc::clone(&cookies))
            .gzip(true)
            .build()
            .map_err(|e| PanelError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(PanelClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                cookies,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for PanelClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: ClientConfig::default().user_agent,
            cookies: None,
        }
    }
}
