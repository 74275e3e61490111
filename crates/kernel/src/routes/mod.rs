//! HTTP route handlers.

pub mod access;
pub mod health;
pub mod navigation;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
///
/// Middleware order (last added = first executed):
/// TraceLayer → resolve_session → routes
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(navigation::router())
        .merge(access::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::resolve_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
