//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use smartspace_api::AppState;
use smartspace_core::config::AppConfig;

/// Name of the smartspace every test app runs as.
pub const LOCAL: &str = "local";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the stores directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub async fn new() -> Self {
        let state = smartspace_api::build_state(AppConfig::in_memory(LOCAL))
            .await
            .expect("Failed to build application state");
        let router = smartspace_api::build_router(state.clone());

        Self { router, state }
    }

    /// Register a user in the local smartspace
    pub async fn create_user(&self, email: &str, role: &str) {
        let response = self
            .request(
                "POST",
                "/smartspace/users",
                Some(json!({
                    "email": email,
                    "username": email.split('@').next().unwrap_or(email),
                    "role": role,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    /// Register an element created by `creator`, returning its id
    pub async fn create_element(&self, creator: &str) -> String {
        let response = self
            .request(
                "POST",
                "/smartspace/elements",
                Some(json!({
                    "name": "Front door",
                    "type": "door",
                    "creatorEmail": creator,
                    "creatorSmartspace": LOCAL,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["elementId"]
            .as_str()
            .expect("element id")
            .to_string()
    }

    /// Invoke an action of `action_type` by `player` on `element_id`
    pub async fn invoke(&self, action_type: &str, player: &str, element_id: &str) -> TestResponse {
        self.request(
            "POST",
            "/smartspace/actions",
            Some(action_body(action_type, player, element_id)),
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// JSON body of an action request in the local smartspace
pub fn action_body(action_type: &str, player: &str, element_id: &str) -> Value {
    json!({
        "type": action_type,
        "playerEmail": player,
        "playerSmartspace": LOCAL,
        "elementId": element_id,
        "elementSmartspace": LOCAL,
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` array of a successful list response
    pub fn data_list(&self) -> Vec<Value> {
        self.body["data"].as_array().cloned().unwrap_or_default()
    }

    /// The `error` code of a failed response
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
