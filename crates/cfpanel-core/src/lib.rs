//! Core types for the cfpanel tunnel dashboard.
//!
//! This crate provides the foundational types shared by the client, the
//! dashboard controller and the CLI:
//!
//! - **Types**: request bodies and typed reply payloads for every backend route
//! - **Replies**: the `{ok, error?}` envelope as [`Reply`], keeping the raw JSON
//! - **Errors**: transport and decoding failures as [`PanelError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cfpanel_core::{Reply, ZoneList};
//!
//! fn show(reply: &Reply<ZoneList>) {
//!     if let Some(list) = &reply.data {
//!         for zone in &list.zones {
//!             println!("{} ({})", zone.name, zone.id);
//!         }
//!     } else {
//!         println!("{}", reply.pretty());
//!     }
//! }
//! ```

mod error;
pub mod types;

pub use error::{PanelError, Result};
pub use types::*;
