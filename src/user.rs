//! The authenticated user as returned by the finance API.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;

/// Server-assigned identifier for a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a server-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user of the application and the categories they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// The categories the user has created.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Fields the client does not use, kept so they survive republishing the user.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl User {
    /// Create a user with no other fields.
    pub fn new(id: UserId, categories: Vec<Category>) -> Self {
        Self {
            id,
            categories,
            other: Map::new(),
        }
    }
}

/// The payload for replacing the cached user.
///
/// The finance API answers with either `{ "user": { .. } }` or the bare user object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SetUserPayload {
    /// `{ "user": { .. } }`
    Wrapped {
        /// The wrapped user.
        user: User,
    },
    /// The user object itself.
    Raw(User),
}

impl SetUserPayload {
    /// The user carried by the payload.
    pub fn into_user(self) -> User {
        match self {
            SetUserPayload::Wrapped { user } | SetUserPayload::Raw(user) => user,
        }
    }
}

impl From<User> for SetUserPayload {
    fn from(user: User) -> Self {
        SetUserPayload::Raw(user)
    }
}
