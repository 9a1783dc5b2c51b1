//! API endpoint modules.

mod auth;
mod bindings;
mod system;
mod tunnels;
mod zones;

pub use auth::AuthApi;
pub use bindings::BindingApi;
pub use system::SystemApi;
pub use tunnels::TunnelApi;
pub use zones::ZoneApi;
