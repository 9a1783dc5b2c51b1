use serde::{Deserialize, Serialize};

use super::common::{loose_text, skip_invalid};

/// A DNS zone controlled by the provider token
///
/// The provider can send `null` for either field; those read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider zone identifier
    #[serde(default, deserialize_with = "loose_text")]
    pub id: String,

    /// Zone apex, e.g. `example.com`
    #[serde(default, deserialize_with = "loose_text")]
    pub name: String,
}

/// Body of `POST /api/zones`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesRequest {
    /// DNS provider API token
    pub token: String,
}

/// Payload of a successful zone listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneList {
    /// Zones visible to the token
    #[serde(default, deserialize_with = "skip_invalid")]
    pub zones: Vec<Zone>,
}

/// Body of `POST /api/register`
///
/// Every field is sent as typed by the user; the backend does the
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// DNS provider API token
    pub token: String,

    /// Provider account identifier
    pub account_id: String,

    /// Zone apex the subdomain is created under
    pub domain: String,

    /// Provider zone identifier
    pub zone_id: String,

    /// Subdomain label (empty binds the apex)
    pub subdomain: String,

    /// Local port the tunnel forwards to
    pub local_port: String,

    /// Local service scheme, e.g. `http`
    #[serde(rename = "type")]
    pub service_type: String,
}

/// Payload of a successful registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    /// Fully qualified domain that was bound
    #[serde(default)]
    pub domain: Option<String>,

    /// Set when the binding was saved but the tunnel failed to start
    #[serde(default)]
    pub note: Option<String>,
}

impl Registration {
    /// Returns true if the tunnel process is running for the new binding
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.note.is_none()
    }
}
