//! Temporary tunnel and proxy node endpoints.

use crate::PanelClient;
use cfpanel_core::{NodeLaunch, NodeRequest, Reply, Result, TempTunnel, TempTunnelRequest};

/// Temporary tunnel and node endpoints
pub struct TunnelApi<'a> {
    client: &'a PanelClient,
}

impl<'a> TunnelApi<'a> {
    pub(crate) const fn new(client: &'a PanelClient) -> Self {
        Self { client }
    }

    /// Start an unregistered tunnel for a local port
    ///
    /// The backend waits up to ~12 seconds for the public URL to appear.
    pub async fn temp_tunnel(&self, request: &TempTunnelRequest) -> Result<Reply<TempTunnel>> {
        self.client.post_reply("/api/temp_tunnel", request).await
    }

    /// Start (or restart) the proxy node
    pub async fn start_node(&self, request: &NodeRequest) -> Result<Reply<NodeLaunch>> {
        self.client.post_reply("/api/start_node", request).await
    }
}
