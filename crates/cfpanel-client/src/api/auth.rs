//! Session and credential endpoints.

use crate::PanelClient;
use cfpanel_core::{ChangePasswordRequest, LoginRequest, Message, Reply, Result};

/// Login, logout and password endpoints
pub struct AuthApi<'a> {
    client: &'a PanelClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) const fn new(client: &'a PanelClient) -> Self {
        Self { client }
    }

    /// Log in; on success the session cookie is kept by the client
    pub async fn login(&self, username: &str, password: &str) -> Result<Reply<Message>> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post_reply("/login", &body).await
    }

    /// Log out. Returns whether the backend answered with a success status.
    pub async fn logout(&self) -> Result<bool> {
        self.client.post_empty("/logout").await
    }

    /// Change the logged-in user's password
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Reply<Message>> {
        self.client.post_reply("/api/change_password", request).await
    }
}
