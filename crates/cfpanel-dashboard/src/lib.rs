//! Dashboard controller for the cfpanel tunnel panel.
//!
//! [`Dashboard`] wires each user gesture to one backend call and one update
//! of an explicit [`ViewState`]. Blocking dialogs go through the injected
//! [`Prompt`] capability and the backend through [`PanelApi`], so the whole
//! controller runs headless in tests.
//!
//! ```rust,ignore
//! let dashboard = Dashboard::new(Arc::new(client), Arc::new(prompt), Some("admin"));
//! dashboard.update_forms(|f| f.token = token.into()).await;
//! dashboard.load_zones().await?;
//! ```

mod actions;
mod backend;
mod controller;
mod outcome;
mod prompt;
mod state;
mod zones;

#[cfg(test)]
mod test_utils;

pub use actions::{ActionTable, RowAction, RowHandler};
pub use backend::PanelApi;
pub use cfpanel_core::{PanelError, Result};
pub use controller::Dashboard;
pub use outcome::{FollowUp, Outcome, FOLLOW_UP_DELAY};
pub use prompt::Prompt;
pub use state::*;
pub use zones::{SelectOption, ZoneKey, ZoneOption, ZoneTable, ZONE_PLACEHOLDER};
