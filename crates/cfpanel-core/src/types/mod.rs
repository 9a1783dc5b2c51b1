mod auth;
mod binding;
mod common;
mod link;
mod reply;
mod system;
mod tunnel;
mod zone;

pub use auth::*;
pub use binding::*;
pub use link::*;
pub use reply::*;
pub use system::*;
pub use tunnel::*;
pub use zone::*;
