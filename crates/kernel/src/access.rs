//! Caller authorization context and the access predicates evaluated against it.
//!
//! Access is an OR-of-ORs: a restricted target is visible when the caller
//! holds *any* listed role or *any* listed permission. A target with no
//! restriction at all is public.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Roles and permissions held by the caller of a request.
///
/// Built from a verified session; an anonymous caller holds nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationContext {
    #[serde(default)]
    roles: BTreeSet<String>,
    #[serde(default)]
    permissions: BTreeSet<String>,
}

impl AuthorizationContext {
    /// A caller with no roles and no permissions.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a context from role and permission tags.
    ///
    /// Duplicate tags collapse and blank tags are ignored. Other tags are kept
    /// verbatim; `" admin "` is not `admin`.
    pub fn new<R, P>(roles: R, permissions: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::anonymous().with_roles(roles).with_permissions(permissions)
    }

    /// Add role tags.
    pub fn with_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.roles.extend(clean_tags(roles));
        self
    }

    /// Add permission tags.
    pub fn with_permissions<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.permissions.extend(clean_tags(permissions));
        self
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// True when the caller holds nothing at all.
    pub fn is_anonymous(&self) -> bool {
        self.roles.is_empty() && self.permissions.is_empty()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Check if the caller holds at least one of `roles`.
    ///
    /// An empty requirement is never satisfied here; publicness is decided by
    /// [`AccessRule::is_public`], not by this predicate.
    pub fn has_any_role<'a, I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        roles.into_iter().any(|r| self.roles.contains(r))
    }

    /// Check if the caller holds at least one of `permissions`.
    pub fn has_any_permission<'a, I>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        permissions.into_iter().any(|p| self.permissions.contains(p))
    }
}

fn clean_tags<I>(tags: I) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    tags.into_iter()
        .map(Into::<String>::into)
        .filter(|t| !t.trim().is_empty())
}

/// Role/permission restriction attached to a navigable target.
///
/// `None` and an empty set mean the same thing: no restriction on that
/// dimension.
#[derive(Debug, Clone, Copy)]
pub struct AccessRule<'a> {
    pub roles: Option<&'a BTreeSet<String>>,
    pub permissions: Option<&'a BTreeSet<String>>,
}

impl<'a> AccessRule<'a> {
    pub fn new(
        roles: Option<&'a BTreeSet<String>>,
        permissions: Option<&'a BTreeSet<String>>,
    ) -> Self {
        Self { roles, permissions }
    }

    /// True when neither roles nor permissions restrict the target.
    pub fn is_public(&self) -> bool {
        self.roles.is_none_or(BTreeSet::is_empty)
            && self.permissions.is_none_or(BTreeSet::is_empty)
    }

    /// Evaluate the rule: public, or any role matches, or any permission matches.
    pub fn permits(&self, ctx: &AuthorizationContext) -> bool {
        self.is_public()
            || self.roles.is_some_and(|r| ctx.has_any_role(r))
            || self.permissions.is_some_and(|p| ctx.has_any_permission(p))
    }
}
