use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;
use tracing::error;

use crate::dto::ApiResponse;
use crate::repo::RepoError;

/// Errors returned by the API handlers
///
/// Every variant maps to one of the response classes in the error
/// taxonomy: client input errors (400), not-found (404), duplicate
/// email conflicts (400), and opaque database faults (500). The
/// underlying cause of a database fault is logged but never returned
/// to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid user id")]
    InvalidId,
    #[error("Invalid request body: {0}")]
    Validation(String),
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("User not found")]
    NotFound,
    #[error("Database error: {detail}")]
    Database {
        detail: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Maps a repository error to an API error
    ///
    /// A `NotFound` from the data layer becomes a 404; anything else is
    /// wrapped as an opaque database fault carrying the given detail
    /// string, which is all the caller will ever see.
    ///
    /// ### Arguments
    ///
    /// * `err` - The repository error to map
    /// * `detail` - The generic detail string for the 500 envelope
    ///
    /// ### Returns
    ///
    /// The corresponding `ApiError`
    pub fn from_repo(err: RepoError, detail: &'static str) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound,
            RepoError::Database(source) => ApiError::Database { detail, source },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid user id".to_string(), None),
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(detail),
            ),
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "Email already exists".to_string(),
                None,
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string(), None),
            ApiError::Database { detail, source } => {
                // The original error stays in the logs; the caller only
                // gets the generic detail string.
                error!("Database error: {:#}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(detail.to_string()),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(message, detail));

        (status, body).into_response()
    }
}
