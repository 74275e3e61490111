//! Page-level access guards.
//!
//! A guarded page lists the roles and permissions allowed to open it and where
//! everybody else is sent instead. The rule is the same one navigation nodes
//! use, so a page is reachable exactly when its menu entry would be visible
//! under the same restriction.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::access::{AccessRule, AuthorizationContext};

/// Default redirect target for callers a guard turns away.
pub const DEFAULT_REDIRECT: &str = "/";

/// Access requirement for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGuard {
    pub path: String,
    #[serde(default)]
    pub allowed_roles: BTreeSet<String>,
    #[serde(default)]
    pub allowed_permissions: BTreeSet<String>,
    #[serde(default = "default_redirect")]
    pub redirect_to: String,
}

fn default_redirect() -> String {
    DEFAULT_REDIRECT.to_string()
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Redirect { to: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The redirect target, if the caller was turned away.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect { to } => Some(to.as_str()),
        }
    }
}

impl PageGuard {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            allowed_roles: BTreeSet::new(),
            allowed_permissions: BTreeSet::new(),
            redirect_to: default_redirect(),
        }
    }

    pub fn allow_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn allow_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn redirect_to(mut self, to: impl Into<String>) -> Self {
        self.redirect_to = to.into();
        self
    }

    pub fn access_rule(&self) -> AccessRule<'_> {
        AccessRule::new(Some(&self.allowed_roles), Some(&self.allowed_permissions))
    }

    /// Decide whether `ctx` may open the page.
    pub fn authorize(&self, ctx: &AuthorizationContext) -> AccessDecision {
        if self.access_rule().permits(ctx) {
            AccessDecision::Allow
        } else {
            AccessDecision::Redirect {
                to: self.redirect_to.clone(),
            }
        }
    }
}

/// Guards indexed by exact page path.
#[derive(Debug, Clone, Default)]
pub struct GuardTable {
    guards: HashMap<String, PageGuard>,
}

impl GuardTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a guard, replacing any previous guard for the same path.
    pub fn insert(&mut self, guard: PageGuard) {
        self.guards.insert(guard.path.clone(), guard);
    }

    pub fn get(&self, path: &str) -> Option<&PageGuard> {
        self.guards.get(path)
    }

    /// Decide access for `path`. Unguarded paths are open to everyone.
    pub fn decide(&self, path: &str, ctx: &AuthorizationContext) -> AccessDecision {
        let Some(guard) = self.guards.get(path) else {
            return AccessDecision::Allow;
        };

        let decision = guard.authorize(ctx);
        if let AccessDecision::Redirect { to } = &decision {
            debug!(path = %path, redirect = %to, "page guard denied access");
        }
        decision
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl FromIterator<PageGuard> for GuardTable {
    fn from_iter<T: IntoIterator<Item = PageGuard>>(iter: T) -> Self {
        let mut table = Self::new();
        for guard in iter {
            table.insert(guard);
        }
        table
    }
}
