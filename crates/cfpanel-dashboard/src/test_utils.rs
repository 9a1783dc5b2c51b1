//! In-memory backend and prompt for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cfpanel_core::{
    BackendCheck, BindingList, ChangePasswordRequest, Message, NodeLaunch, NodeRequest,
    PanelError, RegisterRequest, Registration, Reply, Result, RunResult, TempTunnel,
    TempTunnelRequest, ZoneList,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{Dashboard, PanelApi, Prompt};

// ===== MockApi =====

enum MockReply {
    Json(Value),
    Delayed(Duration, Value),
    Fail(String),
}

/// Records every request and answers from per-route queues.
///
/// Routes without a queued reply answer `{"ok": true}` plus an empty
/// collection where one is expected.
#[derive(Default)]
pub struct MockApi {
    calls: Mutex<Vec<(String, Value)>>,
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    logout_ok: Mutex<Option<bool>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, route: &str, body: Value) {
        self.push(route, MockReply::Json(body));
    }

    pub fn reply_after(&self, route: &str, delay: Duration, body: Value) {
        self.push(route, MockReply::Delayed(delay, body));
    }

    pub fn fail(&self, route: &str, message: &str) {
        self.push(route, MockReply::Fail(message.to_string()));
    }

    pub fn set_logout_ok(&self, ok: bool) {
        *self.logout_ok.lock().unwrap() = Some(ok);
    }

    /// Every `(route, body)` seen so far
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies sent to one route
    pub fn calls_to(&self, route: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(r, _)| r == route)
            .map(|(_, body)| body)
            .collect()
    }

    fn push(&self, route: &str, reply: MockReply) {
        self.replies
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
    }

    fn record(&self, route: &str, body: &impl Serialize) {
        self.calls
            .lock()
            .unwrap()
            .push((route.to_string(), serde_json::to_value(body).unwrap()));
    }

    async fn answer<T: DeserializeOwned>(&self, route: &str, default: Value) -> Result<Reply<T>> {
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(route)
            .and_then(VecDeque::pop_front);

        match next {
            None => Ok(Reply::from_value(default)),
            Some(MockReply::Json(body)) => Ok(Reply::from_value(body)),
            Some(MockReply::Delayed(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(Reply::from_value(body))
            }
            Some(MockReply::Fail(message)) => Err(PanelError::Connection(message)),
        }
    }
}

#[async_trait]
impl PanelApi for MockApi {
    async fn login(&self, username: &str, password: &str) -> Result<Reply<Message>> {
        self.record("/login", &json!({"username": username, "password": password}));
        self.answer("/login", json!({"ok": true, "message": "login success"}))
            .await
    }

    async fn logout(&self) -> Result<bool> {
        self.record("/logout", &Value::Null);
        Ok(self.logout_ok.lock().unwrap().unwrap_or(true))
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Reply<Message>> {
        self.record("/api/change_password", request);
        self.answer("/api/change_password", json!({"ok": true})).await
    }

    async fn temp_tunnel(&self, request: &TempTunnelRequest) -> Result<Reply<TempTunnel>> {
        self.record("/api/temp_tunnel", request);
        self.answer("/api/temp_tunnel", json!({"ok": true})).await
    }

    async fn zones(&self, token: &str) -> Result<Reply<ZoneList>> {
        self.record("/api/zones", &json!({"token": token}));
        self.answer("/api/zones", json!({"ok": true, "zones": []})).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Reply<Registration>> {
        self.record("/api/register", request);
        self.answer("/api/register", json!({"ok": true})).await
    }

    async fn list(&self) -> Result<Reply<BindingList>> {
        self.record("/api/list", &Value::Null);
        self.answer("/api/list", json!({"ok": true, "items": []})).await
    }

    async fn run(&self, domain: &str) -> Result<Reply<RunResult>> {
        self.record("/api/run", &json!({"domain": domain}));
        self.answer("/api/run", json!({"ok": true})).await
    }

    async fn delete(&self, domain: &str) -> Result<Reply<Message>> {
        self.record("/api/delete", &json!({"domain": domain}));
        self.answer("/api/delete", json!({"ok": true})).await
    }

    async fn start_node(&self, request: &NodeRequest) -> Result<Reply<NodeLaunch>> {
        self.record("/api/start_node", request);
        self.answer("/api/start_node", json!({"ok": true})).await
    }

    async fn check(&self) -> Result<BackendCheck> {
        self.record("/api/check", &Value::Null);
        Ok(BackendCheck {
            cloudflared: true,
            xray: false,
            main_dir: "/etc/cf_pro".into(),
        })
    }
}

// ===== MockPrompt =====

/// Answers every confirmation the same way and records what was shown.
pub struct MockPrompt {
    answer: bool,
    confirms: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl MockPrompt {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        })
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Prompt for MockPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

// ===== factories =====

pub fn dashboard_with(api: &Arc<MockApi>, prompt: &Arc<MockPrompt>) -> Dashboard {
    Dashboard::new(api.clone(), prompt.clone(), Some("admin"))
}

pub fn setup() -> (Dashboard, Arc<MockApi>, Arc<MockPrompt>) {
    let api = MockApi::new();
    let prompt = MockPrompt::answering(true);
    (dashboard_with(&api, &prompt), api, prompt)
}
