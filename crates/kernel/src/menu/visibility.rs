//! Role/permission pruning of navigation trees.
//!
//! Every node is checked against the same [`AuthorizationContext`]. A node the
//! caller can't see takes its whole subtree with it, even children that would
//! be public on their own. Surviving siblings keep their original order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NavigationNode;
use crate::access::AuthorizationContext;

/// What to do with a grouping node whose children were all filtered out.
///
/// A grouping node has children but no `href`, `action` or `customRender` of
/// its own. Nodes that are actionable are never dropped by this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyGroupPolicy {
    /// Emit the group with an empty `subOptions` list.
    #[default]
    Retain,
    /// Remove the group from the output.
    Drop,
}

impl FromStr for EmptyGroupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" | "keep" => Ok(Self::Retain),
            "drop" => Ok(Self::Drop),
            other => Err(format!("unknown empty group policy '{other}'")),
        }
    }
}

impl fmt::Display for EmptyGroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retain => f.write_str("retain"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Return the nodes of `tree` the caller may see, recursively.
///
/// Empty grouping nodes are retained; use [`filter_with`] to drop them.
pub fn filter(tree: &[NavigationNode], ctx: &AuthorizationContext) -> Vec<NavigationNode> {
    filter_with(tree, ctx, EmptyGroupPolicy::Retain)
}

/// [`filter`] with an explicit policy for grouping nodes left without children.
pub fn filter_with(
    tree: &[NavigationNode],
    ctx: &AuthorizationContext,
    policy: EmptyGroupPolicy,
) -> Vec<NavigationNode> {
    tree.iter()
        .filter_map(|node| filter_node(node, ctx, policy))
        .collect()
}

fn filter_node(
    node: &NavigationNode,
    ctx: &AuthorizationContext,
    policy: EmptyGroupPolicy,
) -> Option<NavigationNode> {
    if !node.access_rule().permits(ctx) {
        return None;
    }

    let Some(children) = node.sub_options.as_deref() else {
        return Some(node.clone());
    };

    let visible = filter_with(children, ctx, policy);
    if policy == EmptyGroupPolicy::Drop
        && visible.is_empty()
        && !children.is_empty()
        && !node.is_actionable()
    {
        return None;
    }

    let mut kept = node.clone_shallow();
    kept.sub_options = Some(visible);
    Some(kept)
}

impl NavigationNode {
    /// Clone without descending into `sub_options`.
    fn clone_shallow(&self) -> NavigationNode {
        NavigationNode {
            name: self.name.clone(),
            label: self.label.clone(),
            href: self.href.clone(),
            icon: self.icon.clone(),
            icon_props: self.icon_props.clone(),
            action: self.action.clone(),
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
            sub_options: None,
            custom_render: self.custom_render.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn names(nodes: &[NavigationNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    fn roles(tags: &[&str]) -> AuthorizationContext {
        AuthorizationContext::anonymous().with_roles(tags.iter().copied())
    }

    fn settings_tree() -> Vec<NavigationNode> {
        vec![
            NavigationNode::new("dashboard", "Dashboard").with_href("/"),
            NavigationNode::new("settings", "Settings")
                .with_roles(["admin"])
                .with_sub_options(vec![
                    NavigationNode::new("roles", "Roles").with_href("/settings/roles"),
                    NavigationNode::new("permissions", "Permissions")
                        .with_href("/settings/permissions"),
                ]),
        ]
    }

    #[test]
    fn empty_tree_filters_to_empty() {
        assert!(filter(&[], &roles(&["admin"])).is_empty());
    }

    #[test]
    fn public_nodes_survive_anonymous_context() {
        let tree = vec![
            NavigationNode::new("a", "A"),
            NavigationNode::new("b", "B").with_roles(Vec::<String>::new()),
        ];
        let out = filter(&tree, &AuthorizationContext::anonymous());
        assert_eq!(names(&out), ["a", "b"]);
    }

    #[test]
    fn restricted_parent_hides_public_children() {
        let mut tree = settings_tree();
        if let Some(children) = tree[1].sub_options.as_mut() {
            children.push(NavigationNode::new("about", "About").with_roles(Vec::<String>::new()));
        }
        assert!(tree[1].children()[2].is_public());

        let out = filter(&tree, &AuthorizationContext::anonymous());
        assert_eq!(names(&out), ["dashboard"]);
        assert!(!out.iter().any(|n| n.name == "about"));
    }

    #[test]
    fn padded_caller_role_does_not_match() {
        let out = filter(&settings_tree(), &roles(&[" admin "]));
        assert_eq!(names(&out), ["dashboard"]);
    }

    #[test]
    fn admin_sees_settings_with_children() {
        let out = filter(&settings_tree(), &roles(&["admin"]));
        assert_eq!(names(&out), ["dashboard", "settings"]);
        assert_eq!(names(out[1].children()), ["roles", "permissions"]);
        assert_eq!(out, settings_tree());
    }

    #[test]
    fn one_matching_role_is_enough() {
        let tree = vec![NavigationNode::new("email", "Email").with_roles(["moderator", "admin"])];
        assert_eq!(filter(&tree, &roles(&["admin"])).len(), 1);
        assert!(filter(&tree, &roles(&["user"])).is_empty());
    }

    #[test]
    fn permission_grants_visibility_without_role() {
        let tree = vec![
            NavigationNode::new("users", "Users")
                .with_roles(["admin"])
                .with_permissions(["user:management:view"]),
        ];
        let ctx = AuthorizationContext::anonymous().with_permissions(["user:management:view"]);
        assert_eq!(names(&filter(&tree, &ctx)), ["users"]);
    }

    #[test]
    fn children_are_filtered_independently() {
        let tree = vec![
            NavigationNode::new("misc4", "User not inherit option")
                .with_roles(["user", "moderator", "admin"])
                .with_sub_options(vec![
                    NavigationNode::new("public", "Public").with_href("#"),
                    NavigationNode::new("adminOnly", "Admin").with_roles(["admin"]),
                    NavigationNode::new("user", "User").with_roles(["user"]),
                ]),
        ];

        let out = filter(&tree, &roles(&["user"]));
        assert_eq!(names(&out), ["misc4"]);
        assert_eq!(names(out[0].children()), ["public", "user"]);
    }

    #[test]
    fn source_tree_is_untouched() {
        let tree = settings_tree();
        let before = tree.clone();
        let _ = filter(&tree, &AuthorizationContext::anonymous());
        assert_eq!(tree, before);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ctx = roles(&["user"]);
        let tree = settings_tree();
        let once = filter(&tree, &ctx);
        assert_eq!(filter(&once, &ctx), once);
    }

    #[test]
    fn leaf_without_sub_options_stays_without() {
        let out = filter(&settings_tree(), &AuthorizationContext::anonymous());
        assert!(out[0].sub_options.is_none());
    }

    #[test]
    fn retain_keeps_empty_groups() {
        let tree = vec![
            NavigationNode::new("group", "Group")
                .with_sub_options(vec![NavigationNode::new("x", "X").with_roles(["admin"])]),
        ];
        let out = filter(&tree, &roles(&["user"]));
        assert_eq!(names(&out), ["group"]);
        assert_eq!(out[0].sub_options, Some(vec![]));
    }

    #[test]
    fn drop_removes_empty_groups_but_keeps_links() {
        let hidden_child = || NavigationNode::new("x", "X").with_roles(["admin"]);
        let tree = vec![
            NavigationNode::new("group", "Group").with_sub_options(vec![hidden_child()]),
            NavigationNode::new("linked", "Linked")
                .with_href("/linked")
                .with_sub_options(vec![hidden_child()]),
            NavigationNode::new("declared_empty", "Declared").with_sub_options(vec![]),
        ];

        let ctx = roles(&["user"]);
        let out = filter_with(&tree, &ctx, EmptyGroupPolicy::Drop);
        assert_eq!(names(&out), ["linked", "declared_empty"]);
        assert_eq!(filter_with(&out, &ctx, EmptyGroupPolicy::Drop), out);
    }

    #[test]
    fn policy_parses_from_env_values() {
        assert_eq!("drop".parse::<EmptyGroupPolicy>(), Ok(EmptyGroupPolicy::Drop));
        assert_eq!(" Retain ".parse::<EmptyGroupPolicy>(), Ok(EmptyGroupPolicy::Retain));
        assert!("sometimes".parse::<EmptyGroupPolicy>().is_err());
        assert_eq!(EmptyGroupPolicy::Drop.to_string(), "drop");
    }
}
