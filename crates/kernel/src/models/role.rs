//! Well-known roles and the permission naming scheme.
//!
//! Permissions are `"{resource}:management:{verb}"` strings, e.g.
//! `user:management:view`. Roles are coarse lowercase tags.

use serde::{Deserialize, Serialize};

use crate::access::AuthorizationContext;

pub const ADMIN: &str = "admin";
pub const MODERATOR: &str = "moderator";
pub const USER: &str = "user";

/// All built-in roles, most privileged first.
pub const BUILT_IN: &[&str] = &[ADMIN, MODERATOR, USER];

/// CRUD verbs, in the order permission lists are generated.
pub const CRUD_VERBS: &[&str] = &["view", "create", "edit", "delete"];

/// Resources whose management screens are permission-gated.
pub mod resources {
    pub const USER: &str = "user";
    pub const ROLE: &str = "role";
    pub const PERMISSION: &str = "permission";
}

/// Build the full CRUD permission list for a resource.
pub fn crud_permissions(resource: &str) -> Vec<String> {
    CRUD_VERBS
        .iter()
        .map(|verb| format!("{resource}:management:{verb}"))
        .collect()
}

pub fn users_permissions() -> Vec<String> {
    crud_permissions(resources::USER)
}

pub fn roles_permissions() -> Vec<String> {
    crud_permissions(resources::ROLE)
}

pub fn permissions_permissions() -> Vec<String> {
    crud_permissions(resources::PERMISSION)
}

/// A role and permission grant, as an identity provider hands it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Grants {
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }

    pub fn context(&self) -> AuthorizationContext {
        AuthorizationContext::new(self.roles.iter().cloned(), self.permissions.iter().cloned())
    }
}

/// What a first-time social login receives: the `user` role and full
/// management of users, roles and permissions.
pub fn default_grants() -> Grants {
    let mut permissions = users_permissions();
    permissions.extend(roles_permissions());
    permissions.extend(permissions_permissions());

    Grants {
        roles: vec![USER.to_string()],
        permissions,
    }
}
