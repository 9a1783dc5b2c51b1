//! Saved binding endpoints.

use crate::PanelClient;
use cfpanel_core::{BindingList, DomainRequest, Message, Reply, Result, RunResult};

/// Saved binding endpoints
pub struct BindingApi<'a> {
    client: &'a PanelClient,
}

impl<'a> BindingApi<'a> {
    pub(crate) const fn new(client: &'a PanelClient) -> Self {
        Self { client }
    }

    /// List saved bindings
    pub async fn list(&self) -> Result<Reply<BindingList>> {
        self.client.get_reply("/api/list").await
    }

    /// (Re)start the tunnel for a binding
    pub async fn run(&self, domain: &str) -> Result<Reply<RunResult>> {
        self.client
            .post_reply("/api/run", &DomainRequest { domain: domain.to_string() })
            .await
    }

    /// Stop a binding's tunnel and delete its saved config
    pub async fn delete(&self, domain: &str) -> Result<Reply<Message>> {
        self.client
            .post_reply("/api/delete", &DomainRequest { domain: domain.to_string() })
            .await
    }
}
