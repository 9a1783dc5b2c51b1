use serde::{Deserialize, Serialize};

/// Default local port for a temporary tunnel
pub const DEFAULT_TEMP_PORT: &str = "8080";

/// Body of `POST /api/temp_tunnel`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempTunnelRequest {
    /// Local port to expose
    pub port: String,
}

impl TempTunnelRequest {
    /// Build a request, falling back to [`DEFAULT_TEMP_PORT`] for an empty port
    #[must_use]
    pub fn for_port(port: &str) -> Self {
        let port = if port.is_empty() { DEFAULT_TEMP_PORT } else { port };
        Self {
            port: port.to_string(),
        }
    }
}

/// Payload of a successful temporary tunnel start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TempTunnel {
    /// Public `*.trycloudflare.com` URL, if it appeared in time
    #[serde(default)]
    pub domain: Option<String>,

    /// PID of the tunnel process
    #[serde(default)]
    pub pid: Option<u32>,
}

/// Body of `POST /api/start_node`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeRequest {
    /// Node protocol label, e.g. `VMess` or `VLess`
    #[serde(rename = "type")]
    pub node_type: String,

    /// Public domain the node is reached through
    pub domain: String,

    /// Local listen port
    pub port: String,

    /// WebSocket path
    pub path: String,
}

/// Payload of a successful node start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeLaunch {
    /// PID of the proxy process
    #[serde(default)]
    pub pid: Option<u32>,

    /// Client share link (`vmess://` or `vless://`)
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_port_defaults() {
        assert_eq!(TempTunnelRequest::for_port("").port, "8080");
        assert_eq!(TempTunnelRequest::for_port("3000").port, "3000");
    }

    #[test]
    fn test_node_request_uses_type_key() {
        let req = NodeRequest {
            node_type: "VLess".into(),
            domain: "n.example.com".into(),
            port: "10000".into(),
            path: "/ws".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"type":"VLess","domain":"n.example.com","port":"10000","path":"/ws"}"#
        );
    }
}
