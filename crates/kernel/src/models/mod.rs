//! Role and permission vocabulary shared by navigation config, guards and sessions.

pub mod role;

pub use role::{Grants, crud_permissions, default_grants};
