//! Client configuration types.

use std::time::Duration;

/// Backend address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a [`PanelClient`](crate::PanelClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cfpanel/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given backend
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout in whole seconds
    #[must_use]
    pub const fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }
}
