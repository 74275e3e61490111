//! Page access checks for server-side rendering.
//!
//! The front-end asks before rendering a guarded page and follows the
//! redirect when the caller is turned away.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

use crate::access::AuthorizationContext;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize)]
struct AccessQuery {
    path: Option<String>,
}

#[derive(Serialize)]
struct AccessResponse {
    path: String,
    allowed: bool,
    redirect: Option<String>,
}

/// GET /api/access?path=/settings/roles
async fn check_access(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthorizationContext>,
    Query(query): Query<AccessQuery>,
) -> AppResult<Json<AccessResponse>> {
    let path = query
        .path
        .filter(|p| p.starts_with('/'))
        .ok_or_else(|| AppError::BadRequest("path must be an absolute page path".into()))?;

    let decision = state.guards().decide(&path, &ctx);

    Ok(Json(AccessResponse {
        allowed: decision.is_allowed(),
        redirect: decision.redirect().map(str::to_string),
        path,
    }))
}

/// Create the access check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/access", get(check_access))
}
