//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock dependencies injected, enabling comprehensive E2E testing
//! without a real ticket system or SMTP relay.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ticketpress_core::config::{
    AuthConfig, AuthMethod, DispatcherConfig, ServerConfig, TicketingConfig,
};
use ticketpress_core::testing::{MockNotifier, MockTicketing};
use ticketpress_core::{create_authenticator, Config, JobDispatcher, Notifier, TicketingApi};

/// Re-export fixtures for test convenience
pub use ticketpress_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for the
/// ticket system client and the mail transport. Dispatches run on real
/// background workers, so assertions about side effects should go through
/// [`TestFixture::wait_for_upload`] or [`TestFixture::wait_for_send`].
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock ticket system - seed correspondence, inspect uploads
    pub ticketing: Arc<MockTicketing>,
    /// Mock mail transport - inspect sends
    pub notifier: Arc<MockNotifier>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture without request authentication.
    pub async fn new() -> Self {
        Self::with_auth(AuthConfig {
            method: AuthMethod::None,
            username: None,
            password: None,
        })
        .await
    }

    /// Create a test fixture with the given auth configuration.
    pub async fn with_auth(auth: AuthConfig) -> Self {
        let config = Config {
            auth,
            server: ServerConfig::default(),
            ticketing: TicketingConfig {
                base_url: "http://localhost:3000/api/v1".to_string(),
                api_token: "test-token".to_string(),
                timeout_secs: 30,
            },
            smtp: None,
            dispatcher: DispatcherConfig {
                workers: 2,
                queue_capacity: 16,
            },
        };

        let ticketing = Arc::new(MockTicketing::new());
        let notifier = Arc::new(MockNotifier::new());

        let authenticator = Arc::from(
            create_authenticator(&config.auth).expect("Failed to create authenticator"),
        );
        let dispatcher = JobDispatcher::new(
            &config.dispatcher,
            Arc::clone(&ticketing) as Arc<dyn TicketingApi>,
            Some(Arc::clone(&notifier) as Arc<dyn Notifier>),
        );

        let state = Arc::new(ticketpress_server::state::AppState::new(
            config,
            authenticator,
            dispatcher,
        ));

        let router = ticketpress_server::api::create_router(state);

        Self {
            router,
            ticketing,
            notifier,
        }
    }

    /// Seed the mock ticket system with the standard two-entry thread used
    /// by the shared fixtures (entry ids 101 and 102).
    pub async fn seed_thread(&self) {
        self.ticketing
            .add_entry(fixtures::note_entry(
                101,
                "2024-06-15T10:00:00.000Z",
                "rita@example.org",
                "Initial request",
            ))
            .await;
        self.ticketing
            .add_entry(fixtures::note_entry(
                102,
                "2024-06-15T11:00:00.000Z",
                "omar@example.org",
                "Looks fine to me",
            ))
            .await;
    }

    /// Poll until the mock ticket system has recorded an upload, or ~2
    /// seconds elapse.
    pub async fn wait_for_upload(&self) -> bool {
        for _ in 0..200 {
            if !self.ticketing.recorded_uploads().await.is_empty() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Poll until the mock mail transport has recorded a send, or ~2
    /// seconds elapse.
    pub async fn wait_for_send(&self) -> bool {
        for _ in 0..200 {
            if !self.notifier.recorded_sends().await.is_empty() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a GET request with an Authorization header.
    pub async fn get_with_auth(&self, path: &str, authorization: &str) -> TestResponse {
        self.request("GET", path, None, Some(authorization)).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), None).await
    }

    /// Send a POST request with JSON body and an Authorization header.
    pub async fn post_with_auth(
        &self,
        path: &str,
        body: Value,
        authorization: &str,
    ) -> TestResponse {
        self.request("POST", path, Some(body), Some(authorization))
            .await
    }

    /// Send a GET request and return the response body as plain text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(authorization) = authorization {
            request_builder = request_builder.header("Authorization", authorization);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
