//! Anonymous end-user identity.
//!
//! End users never sign in. The browser generates an opaque identifier
//! (normally a random UUID kept in local storage) and sends it with every
//! history or favorite request. The server creates the matching row lazily.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted length of a client-generated user identifier.
pub const CLIENT_USER_ID_MAX: usize = 128;

/// Validation errors returned by [`ClientUserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("userId must not be empty")]
    EmptyId,
    #[error("userId must be at most {max} characters")]
    IdTooLong { max: usize },
}

/// Opaque client-generated user identifier.
///
/// ## Invariants
/// - trimmed of surrounding whitespace.
/// - non-empty and at most [`CLIENT_USER_ID_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientUserId(String);

impl ClientUserId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if trimmed.chars().count() > CLIENT_USER_ID_MAX {
            return Err(UserValidationError::IdTooLong {
                max: CLIENT_USER_ID_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ClientUserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClientUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ClientUserId> for String {
    fn from(value: ClientUserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ClientUserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lazily created end-user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ClientUserId,
    pub created_at: DateTime<Utc>,
}
