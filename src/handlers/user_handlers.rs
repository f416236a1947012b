use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{instrument, debug, info};

use crate::db::DbPool;
use crate::dto::{ApiResponse, CreateUserDto, UpdateUserDto};
use crate::errors::ApiError;
use crate::models::{NewUser, User};
use crate::repo::{self, UserChanges};

/// Parses a path identifier as a base-10 integer
///
/// Non-numeric input is a client error and must be rejected before any
/// data access happens.
///
/// ### Arguments
///
/// * `raw` - The raw path segment
///
/// ### Returns
///
/// The parsed ID, or `ApiError::InvalidId`
fn parse_user_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::InvalidId)
}

/// Validates the required `name` field of a request body
///
/// ### Arguments
///
/// * `name` - The name as deserialized from the body
///
/// ### Returns
///
/// The name, or a validation error if it was missing or empty
fn require_name(name: Option<String>) -> Result<String, ApiError> {
    name.filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("name is required".to_string()))
}

/// Handler for listing all users
///
/// This function handles GET requests to `/users`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
///
/// ### Returns
///
/// A success envelope containing every user, in store order
#[instrument(skip(pool))]
pub async fn list_users_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    debug!("Listing all users");

    // Call the repository function to list all users
    let all_users = repo::list_users(&pool)
        .map_err(|e| ApiError::from_repo(e, "Unable to fetch users"))?;

    info!("Retrieved {} users", all_users.len());

    Ok(Json(ApiResponse::success(
        "Users retrieved successfully",
        all_users,
    )))
}

/// Handler for retrieving a specific user
///
/// This function handles GET requests to `/users/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user_id` - The ID of the user to retrieve, extracted from the URL path
///
/// ### Returns
///
/// A success envelope containing the user, 400 for a non-numeric ID, or
/// 404 if no user has the given ID
#[instrument(skip(pool), fields(user_id = %raw_id))]
pub async fn get_user_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the user ID from the URL path; parsed by hand so a bad ID
    // produces the API's own envelope rather than an extractor rejection
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = parse_user_id(&raw_id)?;

    debug!("Retrieving user");

    // Call the repository function to get the user
    let user = repo::get_user(&pool, user_id)
        .map_err(|e| ApiError::from_repo(e, "Unable to fetch user"))?
        .ok_or(ApiError::NotFound)?;

    debug!("User found with id: {}", user.get_id());

    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        user,
    )))
}

/// Handler for creating a new user
///
/// This function handles POST requests to `/users`.
///
/// `name` is required and must be non-empty. When an email is supplied,
/// an existing user with the same email is rejected up front so the
/// caller gets a clean 400 instead of a constraint-violation 500. The
/// role is fixed to `"user"` and is not client-settable.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The request payload with the new user's fields
///
/// ### Returns
///
/// 201 with a success envelope containing the created user
#[instrument(skip(pool, payload), fields(name = ?payload.name))]
pub async fn create_user_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let name = require_name(payload.name)?;

    info!("Creating new user");

    // Pre-check for an existing user with the same email
    if let Some(ref email) = payload.email {
        let existing = repo::find_user_by_email(&pool, email)
            .map_err(|e| ApiError::from_repo(e, "Unable to create user"))?;

        if existing.is_some() {
            return Err(ApiError::DuplicateEmail);
        }
    }

    // Call the repository function to create the user
    let user = repo::create_user(
        &pool,
        NewUser::new(name, payload.email, payload.password, payload.tel),
    )
    .map_err(|e| ApiError::from_repo(e, "Unable to create user"))?;

    info!("Successfully created user with id: {}", user.get_id());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User created successfully", user)),
    ))
}

/// Handler for updating an existing user
///
/// This function handles PUT and PATCH requests to `/users/{id}`.
///
/// Updates are full replacements: omitted `email`/`password`/`tel`
/// fields clear the stored values. `role` is only replaced when the
/// body provides it.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user_id` - The ID of the user to update, extracted from the URL path
/// * `payload` - The request payload with the replacement field values
///
/// ### Returns
///
/// A success envelope containing the updated user, 400 for a bad ID or
/// missing name, or 404 if no user has the given ID
#[instrument(skip(pool, payload), fields(user_id = %raw_id))]
pub async fn update_user_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the user ID from the URL path
    Path(raw_id): Path<String>,
    // Extract and deserialize the JSON request body
    Json(payload): Json<UpdateUserDto>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = parse_user_id(&raw_id)?;
    let name = require_name(payload.name)?;

    info!("Updating user with id: {}", user_id);

    // Call the repository function to update the user
    let user = repo::update_user(
        &pool,
        user_id,
        UserChanges {
            name,
            email: payload.email,
            password: payload.password,
            tel: payload.tel,
            role: payload.role,
        },
    )
    .map_err(|e| ApiError::from_repo(e, "Unable to update user"))?;

    info!("Successfully updated user with id: {}", user_id);

    Ok(Json(ApiResponse::success("User updated successfully", user)))
}

/// Handler for deleting a user
///
/// This function handles DELETE requests to `/users/{id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user_id` - The ID of the user to delete, extracted from the URL path
///
/// ### Returns
///
/// A success envelope containing the deleted user's prior
/// representation, 400 for a bad ID, or 404 if no user has the given ID
#[instrument(skip(pool), fields(user_id = %raw_id))]
pub async fn delete_user_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the user ID from the URL path
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = parse_user_id(&raw_id)?;

    info!("Deleting user with id: {}", user_id);

    // Call the repository function to delete the user
    let user = repo::delete_user(&pool, user_id)
        .map_err(|e| ApiError::from_repo(e, "Unable to delete user"))?;

    info!("Successfully deleted user with id: {}", user_id);

    Ok(Json(ApiResponse::success("User deleted successfully", user)))
}
