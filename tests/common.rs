/// Common test utilities for Frontdesk integration tests
///
/// This file contains shared functions for all integration tests:
/// test application setup, request plumbing, and a helper for creating
/// users through the API.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use frontdesk::{create_app, db::init_pool, run_migrations};
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

/// Creates a test application with an in-memory SQLite database
///
/// This helper function:
/// 1. Creates an in-memory SQLite database
/// 2. Runs migrations to set up the schema
/// 3. Creates an Axum application with the database
///
/// Using an in-memory database ensures that tests run quickly, are
/// isolated from each other, and need no cleanup. A unique shared-cache
/// URI is used so all pooled connections see the same database.
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an
/// in-memory database
pub fn create_test_app() -> Router {
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    run_migrations(conn);

    // Create and return the application with the configured database pool
    create_app(pool)
}

/// Sends a request to the app and parses the response envelope
///
/// ### Arguments
///
/// * `app` - The test application
/// * `request` - The request to send
///
/// ### Returns
///
/// The response status and the parsed JSON body
pub async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}

/// Builds a JSON request
///
/// ### Arguments
///
/// * `method` - The HTTP method
/// * `uri` - The request path
/// * `body` - The JSON body to send
///
/// ### Returns
///
/// A request with the JSON body and content type set
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Builds a bodiless request
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

/// Creates a user via the API
///
/// This helper function:
/// 1. Sends a POST request to /users with the provided body
/// 2. Verifies the response has a 201 Created status
/// 3. Returns the created user from the envelope's data field
///
/// ### Arguments
///
/// * `app` - The test application
/// * `body` - The JSON body for the create request
///
/// ### Returns
///
/// The created user as a JSON value
pub async fn create_user(app: &mut Router, body: Value) -> Value {
    let (status, envelope) = send(app, json_request("POST", "/users", &body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(envelope["status"], "success");

    envelope["data"].clone()
}
