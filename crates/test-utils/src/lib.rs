//! Cornice test utilities.
//!
//! Helpers for integration testing: navigation fixtures, caller builders
//! and assertion utilities for filtered trees.

use cornice_kernel::models::role::{self, Grants};
use cornice_kernel::{AuthorizationContext, IdentityProvider, NavigationNode, SessionVerifier};

/// Secret shared by test servers and the tokens minted for them.
pub const TEST_SESSION_SECRET: &str = "cornice-test-secret-0123456789abcdef";

/// The two-entry tree used throughout the filter scenarios: a public
/// dashboard and an admin-only settings group.
pub fn dashboard_and_settings() -> Vec<NavigationNode> {
    vec![
        NavigationNode::new("dashboard", "Dashboard").with_href("/"),
        NavigationNode::new("settings", "Settings")
            .with_roles([role::ADMIN])
            .with_sub_options(vec![
                NavigationNode::new("roles", "Roles").with_href("/settings/roles"),
                NavigationNode::new("permissions", "Permissions")
                    .with_href("/settings/permissions"),
            ]),
    ]
}

/// A sidebar covering every access shape: public, single role, role lists,
/// permission-only, mixed, nested restrictions and an empty grouping node.
pub fn cms_sidebar() -> Vec<NavigationNode> {
    let mut tree = dashboard_and_settings();
    tree.extend([
        NavigationNode::new("email", "Email")
            .with_roles([role::MODERATOR, role::ADMIN])
            .with_sub_options(vec![
                NavigationNode::new("emailEditor", "Editor").with_href("/email/editor"),
            ]),
        NavigationNode::new("guide-styles", "Guide styles")
            .with_href("/guide-styles")
            .with_roles(role::BUILT_IN.iter().copied()),
        NavigationNode::new("users", "Users")
            .with_href("/settings/users")
            .with_permissions(["user:management:view"]),
        NavigationNode::new("content", "Content")
            .with_roles(role::BUILT_IN.iter().copied())
            .with_sub_options(vec![
                NavigationNode::new("contentDrafts", "My drafts")
                    .with_href("/content/drafts")
                    .with_roles(role::BUILT_IN.iter().copied()),
                NavigationNode::new("contentReview", "Review queue")
                    .with_href("/content/review")
                    .with_roles([role::MODERATOR, role::ADMIN]),
                NavigationNode::new("contentArchive", "Archive")
                    .with_href("/content/archive")
                    .with_roles([role::ADMIN]),
            ]),
        NavigationNode::new("reports", "Reports").with_sub_options(vec![
            NavigationNode::new("auditLog", "Audit log")
                .with_href("/reports/audit")
                .with_roles([role::ADMIN]),
        ]),
    ]);
    tree
}

/// Create a test caller holding the given roles.
pub fn test_caller(roles: &[&str]) -> TestCaller {
    TestCaller {
        sub: format!("{}@example.test", roles.first().copied().unwrap_or("nobody")),
        provider: IdentityProvider::Credentials,
        grants: Grants {
            roles: roles.iter().map(|s| s.to_string()).collect(),
            permissions: vec![],
        },
    }
}

/// Create an anonymous test caller.
pub fn anonymous_caller() -> TestCaller {
    test_caller(&[])
}

/// Create an admin test caller.
pub fn admin_caller() -> TestCaller {
    test_caller(&[role::ADMIN])
}

/// A test caller builder.
#[derive(Debug, Clone)]
pub struct TestCaller {
    pub sub: String,
    pub provider: IdentityProvider,
    pub grants: Grants,
}

impl TestCaller {
    /// Add a permission.
    pub fn with_permission(mut self, perm: &str) -> Self {
        self.grants.permissions.push(perm.to_string());
        self
    }

    /// Sign in through a different provider.
    pub fn via(mut self, provider: IdentityProvider) -> Self {
        self.provider = provider;
        self
    }

    /// The authorization context the kernel derives for this caller.
    pub fn context(&self) -> AuthorizationContext {
        self.grants.context()
    }

    /// Mint a session token signed with [`TEST_SESSION_SECRET`].
    #[allow(clippy::expect_used)]
    pub fn token(&self) -> String {
        SessionVerifier::new(TEST_SESSION_SECRET.as_bytes())
            .issue(&self.sub, self.provider, &self.grants, 3600)
            .expect("failed to mint test token")
    }

    /// `Authorization` header value for this caller.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

/// Assertion helpers for filtered trees and JSON responses.
pub mod assert {
    use cornice_kernel::NavigationNode;
    use serde_json::Value;

    /// Names of the top-level nodes, in order.
    pub fn names(nodes: &[NavigationNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Names of the top-level items in a navigation response body.
    pub fn item_names(body: &Value) -> Vec<String> {
        body["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a node by name anywhere in the tree.
    pub fn find<'a>(nodes: &'a [NavigationNode], name: &str) -> Option<&'a NavigationNode> {
        nodes.iter().find_map(|n| {
            if n.name == name {
                Some(n)
            } else {
                find(n.children(), name)
            }
        })
    }

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }
}
