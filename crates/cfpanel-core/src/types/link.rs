use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::{PanelError, Result};

/// Proxy protocol of a node share link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkProtocol {
    /// `vmess://` links (base64 JSON payload)
    Vmess,
    /// `vless://` links (URI form)
    Vless,
}

impl fmt::Display for LinkProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vmess => write!(f, "vmess"),
            Self::Vless => write!(f, "vless"),
        }
    }
}

/// Decoded client share link returned by a node start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Link protocol
    pub protocol: LinkProtocol,

    /// Client UUID
    pub id: String,

    /// Address clients connect to
    pub host: String,

    /// Port clients connect to
    pub port: u16,

    /// WebSocket path
    pub path: String,

    /// TLS server name, if set
    pub sni: Option<String>,

    /// Display name, if set
    pub name: Option<String>,
}

/// JSON body inside a vmess link
#[derive(Deserialize)]
struct VmessBody {
    add: String,
    #[serde(deserialize_with = "super::common::string_or_number")]
    port: String,
    id: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    sni: Option<String>,
    #[serde(default)]
    ps: Option<String>,
}

impl ShareLink {
    /// Parse a `vmess://` or `vless://` link.
    pub fn parse(link: &str) -> Result<Self> {
        let link = link.trim();
        if let Some(payload) = link.strip_prefix("vmess://") {
            Self::parse_vmess(payload)
        } else if link.starts_with("vless://") {
            Self::parse_vless(link)
        } else {
            Err(PanelError::InvalidLink(format!("unknown scheme: {link}")))
        }
    }

    fn parse_vmess(payload: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| PanelError::InvalidLink(e.to_string()))?;
        let body: VmessBody = serde_json::from_slice(&bytes)?;
        let port = body
            .port
            .parse()
            .map_err(|_| PanelError::InvalidLink(format!("bad port: {}", body.port)))?;

        Ok(Self {
            protocol: LinkProtocol::Vmess,
            id: body.id,
            host: body.add,
            port,
            path: body.path,
            sni: body.sni.filter(|s| !s.is_empty()),
            name: body.ps.filter(|s| !s.is_empty()),
        })
    }

    fn parse_vless(link: &str) -> Result<Self> {
        let url = Url::parse(link).map_err(|e| PanelError::InvalidLink(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| PanelError::InvalidLink("missing host".into()))?
            .to_string();
        if url.username().is_empty() {
            return Err(PanelError::InvalidLink("missing client id".into()));
        }

        let mut path = String::new();
        let mut sni = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "path" => path = value.into_owned(),
                "sni" => sni = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            protocol: LinkProtocol::Vless,
            id: url.username().to_string(),
            host,
            port: url.port().unwrap_or(443),
            path,
            sni,
            name: url.fragment().map(String::from),
        })
    }
}

impl FromStr for ShareLink {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
