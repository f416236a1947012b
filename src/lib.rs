/// Frontdesk: a REST CRUD API for user accounts
///
/// This library provides the core functionality for a small user
/// management service: data models, database access, and a web API.
///
/// ### Modules
///
/// - `config`: Layered application configuration
/// - `db`: Database connection management
/// - `models`: Data structures representing users
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
/// - `dto`: Request payloads and the response envelope
/// - `errors`: API error types and their HTTP mapping
/// - `handlers`: The request handlers
///
/// ### Web API
///
/// The library exposes a RESTful API using Axum with the following endpoints:
///
/// - `GET /users`: List all users
/// - `GET /users/{id}`: Get a specific user by ID
/// - `POST /users`: Create a new user
/// - `PUT /users/{id}` / `PATCH /users/{id}`: Update a user
/// - `DELETE /users/{id}`: Delete a user
///
/// Every response is wrapped in the `{status, message?, data?, error?}`
/// envelope.

/// Configuration module
pub mod config;

/// Database connection module
pub mod db;

/// Data transfer objects and the response envelope
pub mod dto;

/// API error types
pub mod errors;

/// Web API handlers
pub mod handlers;

/// Data models module
pub mod models;

/// Repository module for database operations
pub mod repo;

/// Database schema module
pub mod schema;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints.
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Routes for listing and creating users
        .route("/users", get(list_users_handler).post(create_user_handler))
        // Routes for getting, updating and deleting a specific user
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        // Allow cross-origin requests
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema.
/// It is used at server startup and in tests.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
