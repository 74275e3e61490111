//! HTTP middleware components.

pub mod session_auth;

pub use session_auth::resolve_session;
