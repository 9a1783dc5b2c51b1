//! DNS zone endpoints.

use crate::PanelClient;
use cfpanel_core::{RegisterRequest, Registration, Reply, Result, ZoneList, ZonesRequest};

/// Zone listing and registration endpoints
pub struct ZoneApi<'a> {
    client: &'a PanelClient,
}

impl<'a> ZoneApi<'a> {
    pub(crate) const fn new(client: &'a PanelClient) -> Self {
        Self { client }
    }

    /// List the zones a provider token can manage
    pub async fn list(&self, token: &str) -> Result<Reply<ZoneList>> {
        let body = ZonesRequest {
            token: token.to_string(),
        };
        self.client.post_reply("/api/zones", &body).await
    }

    /// Create a tunnel, DNS record and saved binding for a subdomain
    pub async fn register(&self, request: &RegisterRequest) -> Result<Reply<Registration>> {
        self.client.post_reply("/api/register", request).await
    }
}
