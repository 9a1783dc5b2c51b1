//! The dashboard controller.

use cfpanel_core::{
    BackendCheck, ChangePasswordRequest, Message, NodeRequest, PanelError, RegisterRequest, Reply,
    Result, TempTunnelRequest,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::actions::{ActionTable, RowAction};
use crate::backend::PanelApi;
use crate::outcome::{FollowUp, Outcome, FOLLOW_UP_DELAY};
use crate::prompt::Prompt;
use crate::state::{
    BindingRow, Forms, ListView, OutputSlot, ViewState, LOGIN_PATH, MSG_ENTER_PASSWORDS,
    MSG_ENTER_TOKEN, MSG_SELECT_ZONE, PENDING_PROCESS, PENDING_SAVE, PENDING_START,
};
use crate::zones::ZoneKey;

/// One dashboard session.
///
/// Cloning is cheap and every clone drives the same state. Requests may
/// overlap freely; for zone loads and list reloads only the reply to the
/// most recently issued request is applied.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    api: Arc<dyn PanelApi>,
    prompt: Arc<dyn Prompt>,
    actions: ActionTable,
    state: RwLock<ViewState>,
    zone_requests: AtomicU64,
    list_requests: AtomicU64,
}

impl Dashboard {
    /// Create a dashboard with the default row controls
    pub fn new(api: Arc<dyn PanelApi>, prompt: Arc<dyn Prompt>, username: Option<&str>) -> Self {
        Self::with_actions(api, prompt, username, ActionTable::default())
    }

    /// Create a dashboard with a custom row action table
    pub fn with_actions(
        api: Arc<dyn PanelApi>,
        prompt: Arc<dyn Prompt>,
        username: Option<&str>,
        actions: ActionTable,
    ) -> Self {
        Self {
            inner: Arc::new(DashboardInner {
                api,
                prompt,
                actions,
                state: RwLock::new(ViewState::for_user(username)),
                zone_requests: AtomicU64::new(0),
                list_requests: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current view
    pub async fn view(&self) -> ViewState {
        self.inner.state.read().await.clone()
    }

    /// Edit form fields
    pub async fn update_forms(&self, edit: impl FnOnce(&mut Forms) + Send) {
        edit(&mut self.inner.state.write().await.forms);
    }

    /// Pick a zone option (or the placeholder)
    pub async fn select_zone(&self, key: Option<ZoneKey>) {
        self.inner.state.write().await.forms.zone = key;
    }

    /// Pick the zone whose name or id matches; returns false if none does
    pub async fn select_zone_named(&self, needle: &str) -> bool {
        let mut state = self.inner.state.write().await;
        let key = state.zones.find(needle);
        state.forms.zone = key;
        key.is_some()
    }

    /// Initial load: fetch the bindings list once
    pub async fn on_page_load(&self) -> Result<Outcome> {
        self.reload_list().await
    }

    /// Log in and update the display name on success
    pub async fn login(&self, username: &str, password: &str) -> Result<Reply<Message>> {
        let reply = self.inner.api.login(username, password).await?;
        if reply.ok {
            info!(username, "logged in");
            self.inner.state.write().await.username_display = format!("user: {username}");
        }
        Ok(reply)
    }

    /// Log out; on success the view's location becomes the login page
    pub async fn logout(&self) -> Result<Outcome> {
        let ok = self.inner.api.logout().await?;
        if ok {
            self.inner.state.write().await.location = Some(LOGIN_PATH.to_string());
        } else {
            debug!("logout refused by backend");
        }
        Ok(Outcome::Done)
    }

    /// Show the change-password dialog
    pub async fn open_password_dialog(&self) {
        self.inner.state.write().await.password_dialog_open = true;
    }

    /// Hide the change-password dialog
    pub async fn close_password_dialog(&self) {
        self.inner.state.write().await.password_dialog_open = false;
    }

    /// A click landed outside the dialog
    pub async fn click_outside_dialog(&self) {
        let mut state = self.inner.state.write().await;
        if state.password_dialog_open {
            state.password_dialog_open = false;
        }
    }

    /// Submit the change-password form.
    ///
    /// On success the dialog closes and both fields clear after
    /// [`FOLLOW_UP_DELAY`].
    pub async fn change_password(&self) -> Result<Outcome> {
        let request = {
            let state = self.inner.state.read().await;
            ChangePasswordRequest {
                old_password: state.forms.old_password.clone(),
                new_password: state.forms.new_password.clone(),
            }
        };
        if request.old_password.is_empty() || request.new_password.is_empty() {
            self.show(OutputSlot::Password, MSG_ENTER_PASSWORDS).await;
            return Ok(Outcome::Blocked);
        }

        self.show(OutputSlot::Password, PENDING_SAVE).await;
        let reply = match self.inner.api.change_password(&request).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.show_failure(OutputSlot::Password, e).await),
        };
        self.show(OutputSlot::Password, reply.pretty()).await;

        if !reply.ok {
            return Ok(Outcome::Refused);
        }
        let this = self.clone();
        Ok(Outcome::Scheduled(FollowUp::after(FOLLOW_UP_DELAY, async move {
            let mut state = this.inner.state.write().await;
            state.password_dialog_open = false;
            state.forms.old_password.clear();
            state.forms.new_password.clear();
        })))
    }

    /// Start a temporary tunnel for the form's port (default 8080)
    pub async fn start_temp_tunnel(&self) -> Result<Outcome> {
        let request = TempTunnelRequest::for_port(&self.inner.state.read().await.forms.temp_port);

        self.show(OutputSlot::Temp, PENDING_START).await;
        match self.inner.api.temp_tunnel(&request).await {
            Ok(reply) => {
                self.show(OutputSlot::Temp, reply.pretty()).await;
                Ok(Outcome::Done)
            }
            Err(e) => Err(self.show_failure(OutputSlot::Temp, e).await),
        }
    }

    /// Load the zones visible to the form's token into the dropdown
    pub async fn load_zones(&self) -> Result<Outcome> {
        let token = self.inner.state.read().await.forms.token.clone();
        if token.is_empty() {
            self.inner.prompt.notify(MSG_ENTER_TOKEN);
            return Ok(Outcome::Blocked);
        }

        let ticket = self.inner.zone_requests.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.inner.api.zones(&token).await;
        if !is_latest(&self.inner.zone_requests, ticket) {
            debug!(ticket, "dropping superseded zone reply");
            return result.map(|_| Outcome::Done);
        }

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "zone load failed");
                self.inner.prompt.notify(&format!("load failed: {e}"));
                return Err(e);
            }
        };
        if !reply.ok {
            self.inner
                .prompt
                .notify(&format!("load failed: {}", reply.failure_text()));
            return Ok(Outcome::Refused);
        }

        let zones = reply.into_data().unwrap_or_default().zones;
        let mut state = self.inner.state.write().await;
        if is_latest(&self.inner.zone_requests, ticket) {
            debug!(count = zones.len(), "zones loaded");
            state.zones.replace(zones);
            state.forms.zone = None;
        }
        Ok(Outcome::Done)
    }

    /// Register the form's subdomain under the selected zone.
    ///
    /// On success the bindings list reloads after [`FOLLOW_UP_DELAY`].
    pub async fn register(&self) -> Result<Outcome> {
        let request = {
            let state = self.inner.state.read().await;
            let forms = &state.forms;
            forms
                .zone
                .and_then(|key| state.zones.resolve(key))
                .map(|zone| RegisterRequest {
                    token: forms.token.clone(),
                    account_id: forms.account_id.clone(),
                    domain: zone.name.clone(),
                    zone_id: zone.id.clone(),
                    subdomain: forms.subdomain.clone(),
                    local_port: forms.local_port.clone(),
                    service_type: forms.service_type.clone(),
                })
        };
        let Some(request) = request else {
            self.inner.prompt.notify(MSG_SELECT_ZONE);
            return Ok(Outcome::Blocked);
        };

        self.show(OutputSlot::Register, PENDING_PROCESS).await;
        let reply = match self.inner.api.register(&request).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.show_failure(OutputSlot::Register, e).await),
        };
        self.show(OutputSlot::Register, reply.pretty()).await;

        if !reply.ok {
            return Ok(Outcome::Refused);
        }
        let this = self.clone();
        Ok(Outcome::Scheduled(FollowUp::after(FOLLOW_UP_DELAY, async move {
            if let Err(e) = this.reload_list().await {
                warn!(error = %e, "list reload after registration failed");
            }
        })))
    }

    /// Rebuild the bindings list from the backend
    pub async fn reload_list(&self) -> Result<Outcome> {
        let ticket = self.inner.list_requests.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.write().await.list = ListView::Loading;

        let result = self.inner.api.list().await;
        let mut state = self.inner.state.write().await;
        if !is_latest(&self.inner.list_requests, ticket) {
            debug!(ticket, "dropping superseded list reply");
            return result.map(|_| Outcome::Done);
        }

        match result {
            Ok(reply) if reply.ok => {
                let rows: Vec<BindingRow> = reply
                    .into_data()
                    .unwrap_or_default()
                    .items
                    .into_iter()
                    .map(BindingRow::from)
                    .collect();
                debug!(count = rows.len(), "bindings loaded");
                state.list = ListView::Rows(rows);
                Ok(Outcome::Done)
            }
            Ok(reply) => {
                state.list = ListView::Raw(reply.compact());
                Ok(Outcome::Refused)
            }
            Err(e) => {
                warn!(error = %e, "list reload failed");
                state.list = ListView::Raw(failure_text(&e));
                Err(e)
            }
        }
    }

    /// A row control was clicked
    pub async fn click_row(&self, domain: &str, action: RowAction) -> Result<Outcome> {
        match self.inner.actions.get(action) {
            Some(handler) => handler.handle(self, domain).await,
            None => {
                debug!(%action, domain, "no handler for row action");
                Ok(Outcome::Ignored)
            }
        }
    }

    /// Start a binding's tunnel and show the reply in a notice
    pub async fn run_binding(&self, domain: &str) -> Result<Outcome> {
        match self.inner.api.run(domain).await {
            Ok(reply) => {
                self.inner.prompt.notify(&reply.compact());
                Ok(Outcome::Done)
            }
            Err(e) => Err(self.notify_failure(e)),
        }
    }

    /// Delete a binding after confirmation, reloading the list on success
    pub async fn delete_binding(&self, domain: &str) -> Result<Outcome> {
        if !self.inner.prompt.confirm(&format!("delete {domain}?")) {
            return Ok(Outcome::Cancelled);
        }

        let reply = match self.inner.api.delete(domain).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.notify_failure(e)),
        };
        self.inner.prompt.notify(&reply.compact());

        if !reply.ok {
            return Ok(Outcome::Refused);
        }
        if let Err(e) = self.reload_list().await {
            warn!(error = %e, domain, "list reload after delete failed");
        }
        Ok(Outcome::Done)
    }

    /// Start the proxy node described by the node form
    pub async fn start_node(&self) -> Result<Outcome> {
        let request = {
            let state = self.inner.state.read().await;
            let node = &state.forms.node;
            NodeRequest {
                node_type: node.node_type.clone(),
                domain: node.domain.clone(),
                port: node.port.clone(),
                path: node.path.clone(),
            }
        };

        self.show(OutputSlot::Node, PENDING_START).await;
        match self.inner.api.start_node(&request).await {
            Ok(reply) => {
                self.show(OutputSlot::Node, reply.pretty()).await;
                Ok(Outcome::Done)
            }
            Err(e) => Err(self.show_failure(OutputSlot::Node, e).await),
        }
    }

    /// Ask the backend which helper binaries it has
    pub async fn check(&self) -> Result<BackendCheck> {
        self.inner.api.check().await
    }

    async fn show(&self, slot: OutputSlot, text: impl Into<String>) {
        *self.inner.state.write().await.outputs.get_mut(slot) = text.into();
    }

    async fn show_failure(&self, slot: OutputSlot, error: PanelError) -> PanelError {
        warn!(error = %error, ?slot, "dashboard request failed");
        self.show(slot, failure_text(&error)).await;
        error
    }

    fn notify_failure(&self, error: PanelError) -> PanelError {
        warn!(error = %error, "dashboard request failed");
        self.inner.prompt.notify(&failure_text(&error));
        error
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("actions", &self.inner.actions)
            .finish_non_exhaustive()
    }
}

fn is_latest(counter: &AtomicU64, ticket: u64) -> bool {
    counter.load(Ordering::SeqCst) == ticket
}

fn failure_text(error: &PanelError) -> String {
    format!("request failed: {error}")
}
