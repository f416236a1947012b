/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database: creating,
/// retrieving, updating and deleting users.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use. Every
/// function returns a `RepoError`, whose `NotFound` variant lets callers
/// distinguish a missing record from any other database fault without
/// inspecting error strings or codes.

mod user_repo;

pub use user_repo::*;

use thiserror::Error;

/// Errors surfaced by the repository layer
#[derive(Error, Debug)]
pub enum RepoError {
    /// No record matched the given key
    #[error("record not found")]
    NotFound,

    /// Any other database or connection-pool fault
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<diesel::result::Error> for RepoError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => RepoError::NotFound,
            other => RepoError::Database(other.into()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepoError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepoError::Database(err.into())
    }
}
