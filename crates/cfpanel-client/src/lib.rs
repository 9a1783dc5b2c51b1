//! HTTP client for the cfpanel dashboard backend.
//!
//! This crate provides [`PanelClient`], a cookie-session client for the
//! panel's JSON routes. Replies come back as [`Reply`] values that keep the
//! server's raw JSON next to the typed payload.

mod client;
mod config;
pub mod api;

pub use cfpanel_core::{PanelError, Reply, Result};
pub use client::{PanelClient, PanelClientBuilder};
pub use config::*;
