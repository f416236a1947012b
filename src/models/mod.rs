/// Data models module
///
/// This module contains the data structures that map to database tables.
/// Each model is kept in its own submodule and re-exported here.

mod user;

pub use user::*;
