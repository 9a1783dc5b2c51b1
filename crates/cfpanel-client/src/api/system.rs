//! Backend health endpoints.

use crate::PanelClient;
use cfpanel_core::{BackendCheck, Result};

/// Backend health endpoints
pub struct SystemApi<'a> {
    client: &'a PanelClient,
}

impl<'a> SystemApi<'a> {
    pub(crate) const fn new(client: &'a PanelClient) -> Self {
        Self { client }
    }

    /// Report which helper binaries the backend can find
    pub async fn check(&self) -> Result<BackendCheck> {
        self.client.get_json("/api/check").await
    }
}
