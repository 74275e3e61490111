//! Cornice Kernel Library
//!
//! Role/permission-gated navigation for CMS front-ends: navigation trees,
//! the per-caller access filter, page guards and the HTTP surface that
//! serves them. The `cornice` binary wraps this library.

pub mod access;
pub mod config;
pub mod error;
pub mod guard;
pub mod menu;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

pub use access::{AccessRule, AuthorizationContext};
pub use config::Config;
pub use error::{AppError, NavError};
pub use guard::{AccessDecision, GuardTable, PageGuard};
pub use menu::{EmptyGroupPolicy, NavigationNode, NavigationRegistry, filter, filter_with};
pub use session::{IdentityProvider, SessionClaims, SessionVerifier};
pub use state::AppState;
