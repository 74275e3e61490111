#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code,
//! not mock implementations. Requests go through the same router, middleware
//! and state the `cornice` binary serves.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cornice_kernel::{AppState, Config};
use cornice_test_utils::TEST_SESSION_SECRET;

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App with the bundled navigation config and a session secret.
    pub fn new() -> Self {
        Self::with_config(Config {
            session_secret: Some(TEST_SESSION_SECRET.to_string()),
            ..Config::default()
        })
    }

    /// App with no session secret; bearer tokens cannot be verified.
    pub fn without_sessions() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(&config).expect("failed to build app state");
        let router = cornice_kernel::routes::app(state.clone());
        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET `uri`, optionally as a bearer-authenticated caller.
    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(value) = bearer {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// GET `uri` and decode a JSON body, asserting the status.
    pub async fn get_json(
        &self,
        uri: &str,
        bearer: Option<&str>,
        expected: StatusCode,
    ) -> serde_json::Value {
        let response = self.get(uri, bearer).await;
        assert_eq!(response.status(), expected, "unexpected status for {uri}");
        body_json(response).await
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}
