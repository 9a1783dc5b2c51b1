//! Row controls and the table that dispatches them.
//!
//! Every binding row carries the same run/delete pair. Clicks go through one
//! entry point ([`Dashboard::click_row`]) that looks the action up here, so
//! rows rebuilt by a reload need no re-registration.

use async_trait::async_trait;
use cfpanel_core::{PanelError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::controller::Dashboard;
use crate::outcome::Outcome;

/// A control embedded in a binding row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    /// Start the binding's tunnel
    Run,
    /// Delete the binding after confirmation
    Delete,
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "run"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for RowAction {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "run" | "start" => Ok(Self::Run),
            "delete" | "rm" => Ok(Self::Delete),
            other => Err(PanelError::Internal(format!("unknown row action: {other}"))),
        }
    }
}

/// Handler for one kind of row control
#[async_trait]
pub trait RowHandler: Send + Sync {
    /// Act on the row carrying `domain`
    async fn handle(&self, dashboard: &Dashboard, domain: &str) -> Result<Outcome>;
}

struct RunHandler;

#[async_trait]
impl RowHandler for RunHandler {
    async fn handle(&self, dashboard: &Dashboard, domain: &str) -> Result<Outcome> {
        dashboard.run_binding(domain).await
    }
}

struct DeleteHandler;

#[async_trait]
impl RowHandler for DeleteHandler {
    async fn handle(&self, dashboard: &Dashboard, domain: &str) -> Result<Outcome> {
        dashboard.delete_binding(domain).await
    }
}

/// Row action → handler
pub struct ActionTable {
    handlers: HashMap<RowAction, Box<dyn RowHandler>>,
}

impl ActionTable {
    /// An empty table
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Install (or replace) the handler for an action
    pub fn register(&mut self, action: RowAction, handler: Box<dyn RowHandler>) {
        self.handlers.insert(action, handler);
    }

    /// Handler for an action, if installed
    #[must_use]
    pub fn get(&self, action: RowAction) -> Option<&dyn RowHandler> {
        self.handlers.get(&action).map(|handler| &**handler)
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(RowAction::Run, Box::new(RunHandler));
        table.register(RowAction::Delete, Box::new(DeleteHandler));
        table
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
