/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP
/// request: validating the input, issuing a single repository call, and
/// wrapping the result or error in the uniform response envelope.

mod user_handlers;

// Re-export all handlers
pub use user_handlers::*;
