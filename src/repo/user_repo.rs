use crate::db::DbPool;
use crate::models::{NewUser, User};
use crate::schema::users;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::{instrument, debug, info};

use super::RepoError;

/// Replacement values for an update
///
/// Updates are full replacements: `name`, `email`, `password` and `tel`
/// always overwrite the stored values (absent optionals clear the column
/// to NULL). `role` is the exception and is only replaced when present.
#[derive(Debug, Clone)]
pub struct UserChanges {
    /// The new display name
    pub name: String,

    /// The new email address, or None to clear it
    pub email: Option<String>,

    /// The new password, or None to clear it
    pub password: Option<String>,

    /// The new telephone number, or None to clear it
    pub tel: Option<String>,

    /// The new role, or None to keep the stored one
    pub role: Option<String>,
}

/// Retrieves all users from the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Users in the database
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_users(pool: &DbPool) -> Result<Vec<User>, RepoError> {
    debug!("Listing all users");

    // Get a connection from the pool
    let conn = &mut pool.get()?;

    // Query the database for all users, in whatever order the store returns
    let result = users::table.load::<User>(conn)?;

    info!("Retrieved {} users", result.len());

    Ok(result)
}

/// Retrieves a user from the database by their ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The ID of the user to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the User if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the user not existing
#[instrument(skip(pool), fields(user_id = %user_id))]
pub fn get_user(pool: &DbPool, user_id: i32) -> Result<Option<User>, RepoError> {
    debug!("Retrieving user by id");

    // Get a connection from the pool
    let conn = &mut pool.get()?;

    // Query the database for the user with the specified ID
    let result = users::table
        .find(user_id)
        .first::<User>(conn)
        .optional()?;

    if result.is_some() {
        debug!("User found with id: {}", user_id);
    } else {
        debug!("User not found");
    }

    Ok(result)
}

/// Retrieves a user from the database by their email address
///
/// Used by the create handler for its duplicate-email pre-check.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `email` - The email address to look up
///
/// ### Returns
///
/// A Result containing an Option with the User if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than no user matching
#[instrument(skip(pool), fields(email = %email))]
pub fn find_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, RepoError> {
    debug!("Retrieving user by email");

    // Get a connection from the pool
    let conn = &mut pool.get()?;

    // Query the database for a user with the specified email
    let result = users::table
        .filter(users::email.eq(email))
        .first::<User>(conn)
        .optional()?;

    Ok(result)
}

/// Creates a new user in the database
///
/// The database assigns the ID; the created row is returned via a
/// RETURNING clause.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `new_user` - The record to insert
///
/// ### Returns
///
/// A Result containing the newly created User if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails (including a unique-email violation)
#[instrument(skip(pool, new_user), fields(name = %new_user.name))]
pub fn create_user(pool: &DbPool, new_user: NewUser) -> Result<User, RepoError> {
    debug!("Creating new user");

    // Get a connection from the pool
    let mut conn = pool.get()?;

    // Insert the new user and read back the row with its assigned id
    let user = diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    info!("Successfully created user with id: {}", user.get_id());

    Ok(user)
}

/// Updates a user in the database by their ID
///
/// Every field in `changes` except `role` overwrites the stored value;
/// `role` is only replaced when present. The `updated_at` timestamp is
/// always refreshed.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The ID of the user to update
/// * `changes` - The replacement field values
///
/// ### Returns
///
/// A Result containing the updated User if successful
///
/// ### Errors
///
/// Returns `RepoError::NotFound` if no user has the given ID, or a
/// database error if:
/// - Unable to get a connection from the pool
/// - The database update operation fails
#[instrument(skip(pool, changes), fields(user_id = %user_id))]
pub fn update_user(pool: &DbPool, user_id: i32, changes: UserChanges) -> Result<User, RepoError> {
    debug!("Updating user by id");

    // Always refresh the updated_at timestamp
    let now = Utc::now().naive_utc();

    // Changeset for the always-replaced columns. treat_none_as_null makes
    // an absent optional clear the column instead of skipping it.
    #[derive(AsChangeset)]
    #[diesel(table_name = users, treat_none_as_null = true)]
    struct UserChangeset {
        name: String,
        email: Option<String>,
        password: Option<String>,
        tel: Option<String>,
        updated_at: NaiveDateTime,
    }

    let changeset = UserChangeset {
        name: changes.name,
        email: changes.email,
        password: changes.password,
        tel: changes.tel,
        updated_at: now,
    };

    let mut conn = pool.get()?;

    // Execute the update; a missing row surfaces as RepoError::NotFound
    // through the RETURNING clause.
    let user = match changes.role {
        Some(role) => diesel::update(users::table.find(user_id))
            .set((changeset, users::role.eq(role)))
            .returning(User::as_returning())
            .get_result(&mut conn)?,
        None => diesel::update(users::table.find(user_id))
            .set(changeset)
            .returning(User::as_returning())
            .get_result(&mut conn)?,
    };

    info!("Successfully updated user with id: {}", user_id);

    Ok(user)
}

/// Deletes a user from the database by their ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The ID of the user to delete
///
/// ### Returns
///
/// A Result containing the deleted user's prior representation
///
/// ### Errors
///
/// Returns `RepoError::NotFound` if no user has the given ID, or a
/// database error if:
/// - Unable to get a connection from the pool
/// - The database delete operation fails
#[instrument(skip(pool), fields(user_id = %user_id))]
pub fn delete_user(pool: &DbPool, user_id: i32) -> Result<User, RepoError> {
    debug!("Deleting user by id");

    let mut conn = pool.get()?;

    // Delete and return the row as it was before deletion
    let user = diesel::delete(users::table.find(user_id))
        .returning(User::as_returning())
        .get_result(&mut conn)?;

    debug!("Successfully deleted user with id: {}", user_id);

    Ok(user)
}
