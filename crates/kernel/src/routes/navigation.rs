//! Filtered navigation for the rendering layer.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;

use crate::access::AuthorizationContext;
use crate::error::{AppError, AppResult};
use crate::menu::{IconProps, NavigationNode, RenderKind};
use crate::state::AppState;

#[derive(Serialize)]
struct NavigationResponse<'a> {
    menu: &'a str,
    items: Vec<RenderedNode<'a>>,
}

/// A visible node plus the render hint the UI would otherwise derive itself.
///
/// Mirrors the [`NavigationNode`] wire shape, with every nested child carrying
/// its own hint too.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedNode<'a> {
    name: &'a str,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_props: Option<&'a IconProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<&'a BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<&'a BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_options: Option<Vec<RenderedNode<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_render: Option<&'a serde_json::Value>,
    render: RenderKind,
}

impl<'a> From<&'a NavigationNode> for RenderedNode<'a> {
    fn from(node: &'a NavigationNode) -> Self {
        Self {
            name: &node.name,
            label: &node.label,
            href: node.href.as_deref(),
            icon: node.icon.as_deref(),
            icon_props: node.icon_props.as_ref(),
            action: node.action.as_deref(),
            roles: node.roles.as_ref(),
            permissions: node.permissions.as_ref(),
            sub_options: node
                .sub_options
                .as_ref()
                .map(|children| children.iter().map(RenderedNode::from).collect()),
            custom_render: node.custom_render.as_ref(),
            render: node.render_kind(),
        }
    }
}

/// GET /api/navigation/{menu} - the menu as the caller may see it.
async fn navigation(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthorizationContext>,
    Path(menu): Path<String>,
) -> AppResult<Response> {
    let Some(items) = state.registry().filtered(&menu, &ctx) else {
        return Err(AppError::NotFound);
    };

    let body = NavigationResponse {
        menu: &menu,
        items: items.iter().map(RenderedNode::from).collect(),
    };

    Ok(Json(body).into_response())
}

/// GET /api/navigation - names of the configured menus.
async fn menus(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .registry()
            .menu_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// Create the navigation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/navigation", get(menus))
        .route("/api/navigation/{menu}", get(navigation))
}
