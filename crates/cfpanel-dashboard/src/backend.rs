//! Backend seam for the dashboard.

use async_trait::async_trait;
use cfpanel_client::PanelClient;
use cfpanel_core::{
    BackendCheck, BindingList, ChangePasswordRequest, Message, NodeLaunch, NodeRequest,
    RegisterRequest, Registration, Reply, Result, RunResult, TempTunnel, TempTunnelRequest,
    ZoneList,
};

/// The backend routes the dashboard talks to.
///
/// Implemented by [`PanelClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, username: &str, password: &str) -> Result<Reply<Message>>;

    /// `POST /logout`, reporting whether the status was a success
    async fn logout(&self) -> Result<bool>;

    /// `POST /api/change_password`
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Reply<Message>>;

    /// `POST /api/temp_tunnel`
    async fn temp_tunnel(&self, request: &TempTunnelRequest) -> Result<Reply<TempTunnel>>;

    /// `POST /api/zones`
    async fn zones(&self, token: &str) -> Result<Reply<ZoneList>>;

    /// `POST /api/register`
    async fn register(&self, request: &RegisterRequest) -> Result<Reply<Registration>>;

    /// `GET /api/list`
    async fn list(&self) -> Result<Reply<BindingList>>;

    /// `POST /api/run`
    async fn run(&self, domain: &str) -> Result<Reply<RunResult>>;

    /// `POST /api/delete`
    async fn delete(&self, domain: &str) -> Result<Reply<Message>>;

    /// `POST /api/start_node`
    async fn start_node(&self, request: &NodeRequest) -> Result<Reply<NodeLaunch>>;

    /// `GET /api/check`
    async fn check(&self) -> Result<BackendCheck>;
}

#[async_trait]
impl PanelApi for PanelClient {
    async fn login(&self, username: &str, password: &str) -> Result<Reply<Message>> {
        self.auth().login(username, password).await
    }

    async fn logout(&self) -> Result<bool> {
        self.auth().logout().await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Reply<Message>> {
        self.auth().change_password(request).await
    }

    async fn temp_tunnel(&self, request: &TempTunnelRequest) -> Result<Reply<TempTunnel>> {
        self.tunnels().temp_tunnel(request).await
    }

    async fn zones(&self, token: &str) -> Result<Reply<ZoneList>> {
        PanelClient::zones(self).list(token).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Reply<Registration>> {
        PanelClient::zones(self).register(request).await
    }

    async fn list(&self) -> Result<Reply<BindingList>> {
        self.bindings().list().await
    }

    async fn run(&self, domain: &str) -> Result<Reply<RunResult>> {
        self.bindings().run(domain).await
    }

    async fn delete(&self, domain: &str) -> Result<Reply<Message>> {
        self.bindings().delete(domain).await
    }

    async fn start_node(&self, request: &NodeRequest) -> Result<Reply<NodeLaunch>> {
        self.tunnels().start_node(request).await
    }

    async fn check(&self) -> Result<BackendCheck> {
        self.system().check().await
    }
}
