//! Session token middleware.
//!
//! Checks `Authorization: Bearer <token>` headers, verifies the session JWT
//! and stores the caller's [`AuthorizationContext`] in request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::access::AuthorizationContext;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the caller's authorization context.
///
/// - No bearer header: anonymous context.
/// - Valid token: the token's roles and permissions.
/// - Invalid token, or no verifier configured: 401.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = auth_header.and_then(|v| v.strip_prefix("Bearer ")) else {
        request
            .extensions_mut()
            .insert(AuthorizationContext::anonymous());
        return next.run(request).await;
    };

    let Some(verifier) = state.verifier() else {
        debug!("bearer token presented but no session secret is configured");
        return AppError::Unauthorized.into_response();
    };

    let claims = match verifier.verify(token.trim()) {
        Ok(c) => c,
        Err(e) => return AppError::from(e).into_response(),
    };

    debug!(sub = %claims.sub, provider = %claims.provider, "session verified");
    request.extensions_mut().insert(claims.context());

    next.run(request).await
}
