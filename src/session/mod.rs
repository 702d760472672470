//! Control session management
//!
//! Owns the control connection and the login handshake.

pub mod auth;
pub mod control;

pub use auth::AuthState;
pub use control::ControlSession;
