//! View state owned by the dashboard.

use cfpanel_core::Binding;
use serde::Serialize;

use crate::actions::RowAction;
use crate::zones::{ZoneKey, ZoneTable};

/// Shown in the password output when a field is empty
pub const MSG_ENTER_PASSWORDS: &str = "please enter both passwords";
/// Notice for a zone load without a token
pub const MSG_ENTER_TOKEN: &str = "please enter an API token";
/// Notice for a registration without a selected zone
pub const MSG_SELECT_ZONE: &str = "please select a zone";

/// Placeholder while a password change is in flight
pub const PENDING_SAVE: &str = "saving...";
/// Placeholder while a tunnel or node is starting
pub const PENDING_START: &str = "starting...";
/// Placeholder while a registration is in flight
pub const PENDING_PROCESS: &str = "processing...";

/// Where the host should navigate after a successful logout
pub const LOGIN_PATH: &str = "/login";

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    /// `user: <name>` line shown in the header
    pub username_display: String,

    /// Whether the change-password dialog is visible
    pub password_dialog_open: bool,

    /// Form fields, as typed
    pub forms: Forms,

    /// Result areas under each form
    pub outputs: Outputs,

    /// Zone dropdown
    pub zones: ZoneTable,

    /// Saved bindings list
    pub list: ListView,

    /// Set once logout succeeds; the host should navigate here
    pub location: Option<String>,
}

impl ViewState {
    /// Fresh state for a session display name
    #[must_use]
    pub fn for_user(username: Option<&str>) -> Self {
        Self {
            username_display: format!("user: {}", username.unwrap_or("user")),
            ..Self::default()
        }
    }
}

/// Form fields. Nothing here is validated beyond presence checks.
#[derive(Debug, Clone, Serialize)]
pub struct Forms {
    /// Current password
    #[serde(skip_serializing)]
    pub old_password: String,

    /// Replacement password
    #[serde(skip_serializing)]
    pub new_password: String,

    /// Temporary tunnel port (empty means the default)
    pub temp_port: String,

    /// DNS provider token
    #[serde(skip_serializing)]
    pub token: String,

    /// Provider account identifier
    pub account_id: String,

    /// Selected zone, if any
    pub zone: Option<ZoneKey>,

    /// Subdomain label to register
    pub subdomain: String,

    /// Local port for the new binding
    pub local_port: String,

    /// Local service scheme
    pub service_type: String,

    /// Node launch form
    pub node: NodeForm,
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            old_password: String::new(),
            new_password: String::new(),
            temp_port: String::new(),
            token: String::new(),
            account_id: String::new(),
            zone: None,
            subdomain: String::new(),
            local_port: String::new(),
            service_type: String::from("http"),
            node: NodeForm::default(),
        }
    }
}

/// Node launch form fields
#[derive(Debug, Clone, Serialize)]
pub struct NodeForm {
    /// Protocol label (`VMess` or `VLess`)
    pub node_type: String,

    /// Public domain for the share link
    pub domain: String,

    /// Local listen port
    pub port: String,

    /// WebSocket path
    pub path: String,
}

impl Default for NodeForm {
    fn default() -> Self {
        Self {
            node_type: String::from("VMess"),
            domain: String::new(),
            port: String::from("8080"),
            path: String::from("/ws"),
        }
    }
}

/// Result areas, holding either a placeholder or the raw reply
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outputs {
    /// Change-password result
    pub password: String,

    /// Temporary tunnel result
    pub temp: String,

    /// Registration result
    pub register: String,

    /// Node start result
    pub node: String,
}

/// Names one of the [`Outputs`] areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSlot {
    /// Change-password result
    Password,
    /// Temporary tunnel result
    Temp,
    /// Registration result
    Register,
    /// Node start result
    Node,
}

impl Outputs {
    /// Text currently shown in an area
    #[must_use]
    pub fn get(&self, slot: OutputSlot) -> &str {
        match slot {
            OutputSlot::Password => &self.password,
            OutputSlot::Temp => &self.temp,
            OutputSlot::Register => &self.register,
            OutputSlot::Node => &self.node,
        }
    }

    pub(crate) fn get_mut(&mut self, slot: OutputSlot) -> &mut String {
        match slot {
            OutputSlot::Password => &mut self.password,
            OutputSlot::Temp => &mut self.temp,
            OutputSlot::Register => &mut self.register,
            OutputSlot::Node => &mut self.node,
        }
    }
}

/// Saved bindings area
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum ListView {
    /// A reload is in flight
    Loading,

    /// One row per saved binding
    Rows(Vec<BindingRow>),

    /// The backend refused or failed; its payload as text
    Raw(String),
}

impl Default for ListView {
    fn default() -> Self {
        Self::Rows(Vec::new())
    }
}

impl ListView {
    /// Rendered rows, empty unless the list loaded
    #[must_use]
    pub fn rows(&self) -> &[BindingRow] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// A rendered binding with its run/delete controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRow {
    /// Domain carried by the row; run and delete act on it
    pub domain: String,

    /// Local port shown next to the domain
    pub local_port: String,
}

impl BindingRow {
    /// Controls embedded in every row
    pub const ACTIONS: [RowAction; 2] = [RowAction::Run, RowAction::Delete];

    /// `<domain> (port <port>)`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} (port {})", self.domain, self.local_port)
    }
}

impl From<Binding> for BindingRow {
    fn from(binding: Binding) -> Self {
        Self {
            domain: binding.domain,
            local_port: binding.local_port,
        }
    }
}
