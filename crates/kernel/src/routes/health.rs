//! Health check endpoint.
//!
//! Returns 200 OK once navigation config is loaded; the kernel has no
//! external backends to probe.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    menus: usize,
    guards: usize,
    sessions: bool,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        menus: state.registry().len(),
        guards: state.guards().len(),
        sessions: state.verifier().is_some(),
    })
}

/// Create the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
