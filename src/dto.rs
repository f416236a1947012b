use serde::{Deserialize, Serialize};

/// Data transfer object for creating a new user
///
/// This struct is used to deserialize JSON requests for creating users.
/// Every field is optional at the deserialization level so that missing
/// fields produce the API's own validation errors rather than a
/// deserialization rejection; `name` is then required by the handler.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreateUserDto {
    /// The user's display name (required, non-empty)
    pub name: Option<String>,

    /// The user's email address
    pub email: Option<String>,

    /// The user's password
    pub password: Option<String>,

    /// The user's telephone number
    pub tel: Option<String>,
}

/// Data transfer object for updating an existing user
///
/// This struct is used to deserialize JSON requests for updating users.
/// Updates are full replacements: omitted fields clear the stored value,
/// except `role`, which is only replaced when present.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct UpdateUserDto {
    /// The user's display name (required, non-empty)
    pub name: Option<String>,

    /// The user's email address
    pub email: Option<String>,

    /// The user's password
    pub password: Option<String>,

    /// The user's telephone number
    pub tel: Option<String>,

    /// The user's role, replaced only when provided
    pub role: Option<String>,
}

/// Detail payload carried inside error envelopes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// A short description of what went wrong
    pub detail: String,
}

/// The uniform response envelope returned by every endpoint
///
/// All responses, success and error alike, are wrapped in this shape:
/// `{status, message?, data?, error?}`. Clients depend on this envelope,
/// so absent fields are omitted from the serialized JSON entirely rather
/// than emitted as null.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    /// Either `"success"` or `"error"`
    pub status: String,

    /// A human-readable description of the outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The payload of a successful response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// The detail of a failed response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T> ApiResponse<T> {
    /// Builds a success envelope with a message and payload
    ///
    /// ### Arguments
    ///
    /// * `message` - A human-readable description of the outcome
    /// * `data` - The payload to return to the caller
    ///
    /// ### Returns
    ///
    /// An `ApiResponse` with status `"success"`
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Builds an error envelope with a message and optional detail
    ///
    /// ### Arguments
    ///
    /// * `message` - A human-readable description of the failure
    /// * `detail` - An optional detail string for the `error` field
    ///
    /// ### Returns
    ///
    /// An `ApiResponse` with status `"error"` and no data
    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            data: None,
            error: detail.map(|detail| ErrorDetail { detail }),
        }
    }
}
