// Centralized error handling for the portal

use crate::models::user::Role;
use thiserror::Error;

/// Errors returned by portal operations
///
/// Ordinary misses (unknown ids, wrong credentials) are not errors: lookups
/// return `Option` or an empty `Vec`. These variants cover the boundary
/// operations and backend failures.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("No user is logged in")]
    NotAuthenticated,

    #[error("Access denied: requires {required} role, current user is {actual}")]
    Forbidden { required: Role, actual: Role },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize {key}: {source}")]
    Serialization {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Input checks applied at the boundary the presentation layer used to own
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter format: {0}")]
    InvalidFormat(String),

    #[error("Parameter out of range: {0}")]
    OutOfRange(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("User {0} is protected and cannot be removed")]
    ProtectedUser(String),
}
