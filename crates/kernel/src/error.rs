//! Application error types.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by the collaborators around the navigation filter.
///
/// The filter itself never fails; configuration loading and session
/// verification do.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid navigation config for '{menu}': {reason}")]
    ConfigInvalid { menu: String, reason: String },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("failed to read navigation config")]
    Io(#[from] std::io::Error),
}

impl NavError {
    pub(crate) fn config(menu: impl Into<String>, reason: impl ToString) -> Self {
        Self::ConfigInvalid {
            menu: menu.into(),
            reason: reason.to_string(),
        }
    }
}

/// HTTP-facing errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<NavError> for AppError {
    fn from(e: NavError) -> Self {
        match e {
            NavError::AuthenticationFailed(_) => AppError::Unauthorized,
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Bearer error=\"invalid_token\"")],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_names_the_menu() {
        let err = NavError::config("sidebar", "duplicate sibling name 'roles'");
        let msg = err.to_string();
        assert!(msg.contains("sidebar"), "got: {msg}");
        assert!(msg.contains("duplicate sibling name"), "got: {msg}");
    }

    #[test]
    fn authentication_failure_maps_to_401() {
        let err: AppError = NavError::AuthenticationFailed("expired".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn config_error_maps_to_500() {
        let err: AppError = NavError::config("header", "empty name").into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
