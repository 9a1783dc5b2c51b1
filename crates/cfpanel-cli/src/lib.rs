//! # cfpanel-cli
//!
//! Command-line dashboard for the cfpanel tunnel registration backend.
//!
//! ## Features
//!
//! - **Session**: `login` saves the backend cookie so later commands reuse it
//! - **Tunnels**: temporary tunnels and VMess/VLess nodes with share links
//! - **Registration**: load zones for a token and register subdomains
//! - **Bindings**: list, run and delete saved bindings
//! - **Interactive shell**: one long-lived dashboard session in a REPL
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod interactive;
pub mod output;

pub use cli::run;
