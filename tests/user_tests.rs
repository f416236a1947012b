/// Integration tests for the user endpoints
///
/// This file drives the full router over in-memory requests and checks
/// the externally observable contract: status codes, the response
/// envelope, validation ordering, and the store's state after each
/// operation.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::*;

/// Tests creating a user with only a name
///
/// This test verifies:
/// 1. A POST request to /users with just a name succeeds with 201
/// 2. The store assigns an id
/// 3. `tel` defaults to null and `role` defaults to "user"
#[tokio::test]
async fn test_create_user_minimal() {
    let mut app = create_test_app();

    let (status, envelope) = send(
        &mut app,
        json_request("POST", "/users", &json!({"name": "Ann"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["message"], "User created successfully");
    assert_eq!(envelope["data"]["name"], "Ann");
    assert!(envelope["data"]["id"].is_number());
    assert!(envelope["data"]["tel"].is_null());
    assert_eq!(envelope["data"]["role"], "user");
}

/// Tests that creating a user without a name is rejected
///
/// The request must fail with 400 and must not insert anything.
#[tokio::test]
async fn test_create_user_missing_name() {
    let mut app = create_test_app();

    let (status, envelope) = send(
        &mut app,
        json_request("POST", "/users", &json!({"email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "Invalid request body");
    assert_eq!(envelope["error"]["detail"], "name is required");

    // Nothing was inserted
    let (_, list) = send(&mut app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"], json!([]));
}

/// Tests the duplicate-email pre-check on create
///
/// Creating the same email twice must fail the second time with 400
/// "Email already exists" and leave only one record in the store.
#[tokio::test]
async fn test_create_user_duplicate_email() {
    let mut app = create_test_app();

    create_user(&mut app, json!({"name": "Ann", "email": "a@x.com"})).await;

    let (status, envelope) = send(
        &mut app,
        json_request("POST", "/users", &json!({"name": "Bob", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "Email already exists");

    let (_, list) = send(&mut app, empty_request("GET", "/users")).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

/// Tests the create → get round trip
///
/// Getting a just-created user must return the same field values that
/// were submitted.
#[tokio::test]
async fn test_create_then_get_round_trip() {
    let mut app = create_test_app();

    let created = create_user(
        &mut app,
        json!({
            "name": "Ann",
            "email": "a@x.com",
            "password": "secret",
            "tel": "5551234"
        }),
    )
    .await;

    let uri = format!("/users/{}", created["id"]);
    let (status, envelope) = send(&mut app, empty_request("GET", &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["id"], created["id"]);
    assert_eq!(envelope["data"]["name"], "Ann");
    assert_eq!(envelope["data"]["email"], "a@x.com");
    assert_eq!(envelope["data"]["password"], "secret");
    assert_eq!(envelope["data"]["tel"], "5551234");
}

/// Tests that a non-numeric id is rejected on every id-taking endpoint
#[tokio::test]
async fn test_invalid_id_is_rejected_everywhere() {
    let mut app = create_test_app();

    let requests = vec![
        empty_request("GET", "/users/abc"),
        json_request("PUT", "/users/abc", &json!({"name": "Ann"})),
        json_request("PATCH", "/users/abc", &json!({"name": "Ann"})),
        empty_request("DELETE", "/users/abc"),
    ];

    for request in requests {
        let (status, envelope) = send(&mut app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["message"], "Invalid user id");
    }
}

/// Tests getting a user that does not exist
#[tokio::test]
async fn test_get_user_not_found() {
    let mut app = create_test_app();

    let (status, envelope) = send(&mut app, empty_request("GET", "/users/9999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "User not found");
}

/// Tests listing users
///
/// Two GETs with no intervening writes must return identical sets.
#[tokio::test]
async fn test_list_users_is_idempotent() {
    let mut app = create_test_app();

    create_user(&mut app, json!({"name": "Ann", "email": "a@x.com"})).await;
    create_user(&mut app, json!({"name": "Bob", "email": "b@x.com"})).await;

    let (status, first) = send(&mut app, empty_request("GET", "/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "success");
    assert_eq!(first["data"].as_array().unwrap().len(), 2);

    let (_, second) = send(&mut app, empty_request("GET", "/users")).await;
    assert_eq!(first["data"], second["data"]);
}

/// Tests updating a user with full-replace semantics
///
/// Omitting `tel` in the body must clear the stored value; `role` stays
/// untouched when not provided.
#[tokio::test]
async fn test_update_user_full_replace() {
    let mut app = create_test_app();

    let created = create_user(
        &mut app,
        json!({"name": "Ann", "email": "a@x.com", "tel": "5551234"}),
    )
    .await;

    let uri = format!("/users/{}", created["id"]);
    let (status, envelope) = send(
        &mut app,
        json_request(
            "PUT",
            &uri,
            &json!({"name": "Ann Updated", "email": "ann@x.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["message"], "User updated successfully");
    assert_eq!(envelope["data"]["name"], "Ann Updated");
    assert_eq!(envelope["data"]["email"], "ann@x.com");
    assert!(envelope["data"]["tel"].is_null());
    assert_eq!(envelope["data"]["role"], "user");
}

/// Tests updating a user's role
#[tokio::test]
async fn test_update_user_role() {
    let mut app = create_test_app();

    let created = create_user(&mut app, json!({"name": "Ann"})).await;

    let uri = format!("/users/{}", created["id"]);
    let (status, envelope) = send(
        &mut app,
        json_request("PATCH", &uri, &json!({"name": "Ann", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["data"]["role"], "admin");
}

/// Tests that an update without a name is rejected and changes nothing
#[tokio::test]
async fn test_update_user_missing_name() {
    let mut app = create_test_app();

    let created = create_user(&mut app, json!({"name": "Ann", "tel": "5551234"})).await;

    let uri = format!("/users/{}", created["id"]);
    let (status, envelope) = send(
        &mut app,
        json_request("PUT", &uri, &json!({"email": "ann@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope["error"]["detail"], "name is required");

    // The stored user is unchanged
    let (_, after) = send(&mut app, empty_request("GET", &uri)).await;
    assert_eq!(after["data"]["name"], "Ann");
    assert_eq!(after["data"]["tel"], "5551234");
}

/// Tests updating a user that does not exist
#[tokio::test]
async fn test_update_user_not_found() {
    let mut app = create_test_app();

    let (status, envelope) = send(
        &mut app,
        json_request("PUT", "/users/9999", &json!({"name": "Ghost"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "User not found");
}

/// Tests deleting a user
///
/// The response carries the deleted user's prior representation, and a
/// subsequent GET returns 404.
#[tokio::test]
async fn test_delete_user() {
    let mut app = create_test_app();

    let created = create_user(&mut app, json!({"name": "Ann", "email": "a@x.com"})).await;

    let uri = format!("/users/{}", created["id"]);
    let (status, envelope) = send(&mut app, empty_request("DELETE", &uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["message"], "User deleted successfully");
    assert_eq!(envelope["data"]["id"], created["id"]);
    assert_eq!(envelope["data"]["email"], "a@x.com");

    let (status, _) = send(&mut app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests deleting a user that does not exist
///
/// The failure envelope uses status "error" like every other failure.
#[tokio::test]
async fn test_delete_user_not_found() {
    let mut app = create_test_app();

    let (status, envelope) = send(&mut app, empty_request("DELETE", "/users/9999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "User not found");
}

/// Tests that success envelopes never carry an error field and error
/// envelopes never carry data
#[tokio::test]
async fn test_envelope_field_presence() {
    let mut app = create_test_app();

    let (_, success) = send(&mut app, empty_request("GET", "/users")).await;
    assert!(success.get("error").is_none());

    let (_, error) = send(&mut app, empty_request("GET", "/users/9999")).await;
    assert!(error.get("data").is_none());
}
