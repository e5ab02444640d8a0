//! Staff auth session.

mod commands;
mod service;
mod session;

pub use commands::{ClearToken, SetToken, SetUser};
pub use service::AuthService;
pub use session::{AuthEvent, AuthSession, Role, UserInfo};
