//! Domain library for the user store.
//!
//! This crate is dependency-light (serde for the entity, workspace metadata
//! otherwise) and holds the domain type, the repository port (trait), the
//! service facade, and the error definitions. Keep adapters and IO concerns
//! out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// `id` is store-assigned: `None` before the first successful save and
/// `Some` thereafter. It is never reassigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a new, not-yet-persisted user (`id: None`).
    pub fn new<S: Into<String>, T: Into<String>>(name: S, email: T) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Repository port for persisting and loading users.
///
/// Exactly the four operations the service needs; no query derivation
/// beyond these.
pub trait UserRepository: Send + Sync {
    /// All stored users, ordered by ascending id. Empty vec if none.
    fn find_all(&self) -> Result<Vec<User>, CoreError>;

    /// Zero-or-one user matching the given id.
    fn find_by_id(&self, id: i64) -> Result<Option<User>, CoreError>;

    /// Insert (assigning the next id) when `user.id` is `None`, or update
    /// the matching row when `Some`. Returns the persisted state.
    fn save(&self, user: User) -> Result<User, CoreError>;

    /// Remove the row matching `user.id`.
    fn delete(&self, user: &User) -> Result<(), CoreError>;
}

/// Core domain errors (no external error crates to keep deps light).
#[derive(Debug)]
pub enum CoreError {
    /// The operation required `user.id` and it was `None`.
    MissingId,
    /// An update or delete targeted an id with no stored row.
    NotFound,
    /// Adapter-level failure; the message is preserved unchanged.
    Repository(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::MissingId => write!(f, "user has no id"),
            CoreError::NotFound => write!(f, "not found"),
            CoreError::Repository(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

impl Error for CoreError {}

// Re-export modules when added
pub mod adapters;
pub mod service;
