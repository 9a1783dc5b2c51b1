//! Command implementations.

pub mod bindings;
pub mod check;
pub mod config;
pub mod session;
pub mod shell;
pub mod tunnel;
pub mod zones;

use std::sync::Arc;

use anyhow::Result;
use cfpanel::{ClientConfig, Dashboard, PanelClient, PanelClientBuilder};
use colored::Colorize;
use serde_json::Value;
use tracing::debug;

use crate::config::Session;
use crate::interactive::TerminalPrompt;
use crate::output::{render_reply, OutputFormat};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Backend base URL
    pub url: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Answer yes to confirmations
    pub assume_yes: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Username saved by the last login
    pub username: Option<String>,
}

impl Context {
    /// Create a client for the backend, resuming any saved session.
    pub fn client(&self) -> Result<PanelClient> {
        let config = ClientConfig::new(self.url.as_str()).timeout_secs(self.timeout_secs);
        let client = PanelClientBuilder::from_config(config).build()?;

        if let Some(cookie) = Session::load()? {
            debug!("resuming saved session");
            client.restore_session(&cookie);
        }
        Ok(client)
    }

    /// Create a dashboard session over a fresh client.
    ///
    /// The client is returned too so callers can save its session.
    pub fn dashboard(&self) -> Result<(PanelClient, Dashboard)> {
        let client = self.client()?;
        let dashboard = Dashboard::new(
            Arc::new(client.clone()),
            Arc::new(TerminalPrompt::new(self.assume_yes)),
            self.username.as_deref(),
        );
        Ok((client, dashboard))
    }

    /// Whether to draw colors, spinners and tables
    pub fn is_pretty(&self) -> bool {
        self.output_format == OutputFormat::Pretty
    }
}

/// Save the client's current cookies as the session.
pub fn save_session(client: &PanelClient) -> Result<()> {
    match client.session_cookie() {
        Some(cookie) => Session::save(&cookie),
        None => Session::clear(),
    }
}

/// Print an output slot; JSON replies are re-rendered in the chosen format.
pub fn print_slot(ctx: &Context, text: &str) -> Result<()> {
    match serde_json::from_str::<Value>(text) {
        Ok(reply) => println!("{}", render_reply(ctx.output_format, &reply)?),
        Err(_) => println!("{}", text.red()),
    }
    Ok(())
}
