//! Client and dashboard controller for a Cloudflare tunnel registration panel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cfpanel::PanelClient;
//!
//! #[tokio::main]
//! async fn main() -> cfpanel::Result<()> {
//!     let client = PanelClient::new("http://127.0.0.1:5000")?;
//!     client.auth().login("admin", "admin123").await?;
//!
//!     // Saved bindings
//!     let reply = client.bindings().list().await?;
//!     for item in reply.into_data().unwrap_or_default().items {
//!         println!("{} -> {}", item.domain, item.local_port);
//!     }
//!
//!     // Start a quick tunnel on the default port
//!     let tunnel = client
//!         .tunnels()
//!         .temp_tunnel(&cfpanel::TempTunnelRequest::for_port(""))
//!         .await?;
//!     println!("{}", tunnel.pretty());
//!
//!     Ok(())
//! }
//! ```
//!
//! For an interactive session, wrap the client in a [`Dashboard`] with a
//! [`Prompt`] implementation.
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

// Re-export core types
pub use cfpanel_core::*;

// Re-export client
pub use cfpanel_client::{ClientConfig, PanelClient, PanelClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

// Re-export the dashboard controller
pub use cfpanel_dashboard as dashboard;
pub use cfpanel_dashboard::{Dashboard, Outcome, PanelApi, Prompt, RowAction};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
