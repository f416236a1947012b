use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Represents a user account
///
/// This struct maps directly to the `users` table in the database.
/// The `id` is assigned by the database on insert and is the sole identity
/// of a user; `email` additionally carries a unique constraint.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Unique identifier for the user, assigned by the database
    id: i32,

    /// The user's display name
    name: String,

    /// The user's email address, if provided
    email: Option<String>,

    /// The user's password, stored as given
    password: Option<String>,

    /// The user's telephone number, if provided
    tel: Option<String>,

    /// The user's role, `"user"` unless changed by an update
    role: String,

    /// When this user was created
    created_at: NaiveDateTime,

    /// When this user was last updated
    updated_at: NaiveDateTime,
}

impl User {
    /// Creates a user with all fields specified
    ///
    /// This method is primarily used for testing and deserialization.
    ///
    /// ### Arguments
    ///
    /// * `id` - The unique identifier for the user
    /// * `name` - The user's name
    /// * `email` - The user's email address
    /// * `password` - The user's password
    /// * `tel` - The user's telephone number
    /// * `role` - The user's role
    /// * `created_at` - When the user was created
    /// * `updated_at` - When the user was last updated
    ///
    /// ### Returns
    ///
    /// A new `User` instance with the specified fields
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_fields(
        id: i32,
        name: String,
        email: Option<String>,
        password: Option<String>,
        tel: Option<String>,
        role: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            tel,
            role,
            created_at,
            updated_at,
        }
    }

    /// Gets the user's ID
    pub fn get_id(&self) -> i32 {
        self.id
    }

    /// Gets the user's name
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Gets the user's email address
    pub fn get_email(&self) -> Option<String> {
        self.email.clone()
    }

    /// Gets the user's password
    pub fn get_password(&self) -> Option<String> {
        self.password.clone()
    }

    /// Gets the user's telephone number
    pub fn get_tel(&self) -> Option<String> {
        self.tel.clone()
    }

    /// Gets the user's role
    pub fn get_role(&self) -> String {
        self.role.clone()
    }

    /// Gets when the user was created
    pub fn get_created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Gets when the user was last updated
    pub fn get_updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

/// Insertable record for creating a new user
///
/// The database assigns the `id`, so this struct carries every column
/// except it. `role` is always `"user"` for newly created accounts.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    /// The user's display name
    pub name: String,

    /// The user's email address, if provided
    pub email: Option<String>,

    /// The user's password, stored as given
    pub password: Option<String>,

    /// The user's telephone number, if provided
    pub tel: Option<String>,

    /// The user's role
    pub role: String,

    /// When this user was created
    pub created_at: NaiveDateTime,

    /// When this user was last updated
    pub updated_at: NaiveDateTime,
}

impl NewUser {
    /// Creates a new user record ready for insertion
    ///
    /// This method sets the role to `"user"` and both timestamps to the
    /// current time. An empty telephone number is stored as NULL.
    ///
    /// ### Arguments
    ///
    /// * `name` - The user's name
    /// * `email` - The user's email address
    /// * `password` - The user's password
    /// * `tel` - The user's telephone number
    ///
    /// ### Returns
    ///
    /// A new `NewUser` instance ready to be inserted
    pub fn new(
        name: String,
        email: Option<String>,
        password: Option<String>,
        tel: Option<String>,
    ) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            name,
            email,
            password,
            tel: tel.filter(|t| !t.is_empty()),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
