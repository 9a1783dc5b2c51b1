use serde::{Deserialize, Serialize};

/// Tool availability reported by `GET /api/check`
///
/// This route is not wrapped in the `ok` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendCheck {
    /// Whether the cloudflared binary is installed and executable
    #[serde(default)]
    pub cloudflared: bool,

    /// Whether the xray binary is installed and executable
    #[serde(default)]
    pub xray: bool,

    /// Backend state directory
    #[serde(default)]
    pub main_dir: String,
}

impl BackendCheck {
    /// Returns true if both tunnel and node binaries are present
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cloudflared && self.xray
    }
}
