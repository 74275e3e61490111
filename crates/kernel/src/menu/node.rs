//! Navigation tree node.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::access::AccessRule;

/// Presentation hints for a node's icon. Never interpreted by the kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconProps {
    pub src: String,
    #[serde(default)]
    pub fill_white_path: bool,
}

/// One entry of a navigation menu (sidebar, header, ...).
///
/// Field names serialize in camelCase because the rendering side consumes
/// them as-is (`subOptions`, `iconProps`, `customRender`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    /// Identifier, unique among siblings.
    #[serde(default)]
    pub name: String,
    /// Display text.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_props: Option<IconProps>,
    /// Named client-side action triggered on click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Roles allowed to see the node (any one suffices).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<String>>,
    /// Permissions allowed to see the node (any one suffices).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
    /// Children, in render order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_options: Option<Vec<NavigationNode>>,
    /// Opaque payload handed straight to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_render: Option<serde_json::Value>,
}

/// How the rendering side turns a node into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Custom,
    Dropdown,
    Link,
    Button,
    Label,
}

impl NavigationNode {
    /// Create a public node with just a name and label.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            href: None,
            icon: None,
            icon_props: None,
            action: None,
            roles: None,
            permissions: None,
            sub_options: None,
            custom_render: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sub_options(mut self, children: Vec<NavigationNode>) -> Self {
        self.sub_options = Some(children);
        self
    }

    /// The node's access restriction.
    pub fn access_rule(&self) -> AccessRule<'_> {
        AccessRule::new(self.roles.as_ref(), self.permissions.as_ref())
    }

    /// True when the node carries no role or permission restriction.
    pub fn is_public(&self) -> bool {
        self.access_rule().is_public()
    }

    /// True when the node does something on its own, without children.
    pub fn is_actionable(&self) -> bool {
        self.href.is_some() || self.action.is_some() || self.custom_render.is_some()
    }

    /// Children, or an empty slice when the node has none.
    pub fn children(&self) -> &[NavigationNode] {
        self.sub_options.as_deref().unwrap_or_default()
    }

    /// Renderer precedence: custom payload, dropdown, link, button, plain label.
    pub fn render_kind(&self) -> RenderKind {
        if self.custom_render.is_some() {
            RenderKind::Custom
        } else if self.sub_options.is_some() {
            RenderKind::Dropdown
        } else if self.href.is_some() {
            RenderKind::Link
        } else if self.action.is_some() {
            RenderKind::Button
        } else {
            RenderKind::Label
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_config() {
        let json = r#"{
            "name": "settings",
            "label": "Settings",
            "roles": ["admin"],
            "iconProps": {"src": "gear", "fillWhitePath": true},
            "subOptions": [{"name": "roles", "label": "Roles", "href": "/settings/roles"}]
        }"#;

        let node: NavigationNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "settings");
        assert!(node.icon_props.as_ref().unwrap().fill_white_path);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].href.as_deref(), Some("/settings/roles"));
        assert!(!node.is_public());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let node = NavigationNode::new("dashboard", "Dashboard").with_href("/");
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"name": "dashboard", "label": "Dashboard", "href": "/"})
        );
    }

    #[test]
    fn empty_role_list_is_public() {
        let node = NavigationNode::new("x", "X").with_roles(Vec::<String>::new());
        assert!(node.is_public());
    }

    #[test]
    fn render_kind_precedence() {
        let dropdown = NavigationNode::new("email", "Email")
            .with_href("/email")
            .with_sub_options(vec![]);
        assert_eq!(dropdown.render_kind(), RenderKind::Dropdown);

        let mut custom = dropdown.clone();
        custom.custom_render = Some(serde_json::json!({"component": "wallet"}));
        assert_eq!(custom.render_kind(), RenderKind::Custom);

        let link = NavigationNode::new("home", "Home").with_href("/");
        assert_eq!(link.render_kind(), RenderKind::Link);

        let button = NavigationNode::new("logout", "Log out").with_action("sign_out");
        assert_eq!(button.render_kind(), RenderKind::Button);

        assert_eq!(NavigationNode::new("x", "X").render_kind(), RenderKind::Label);
    }
}
