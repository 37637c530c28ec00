//! User entity and registration/login input.

use serde::Deserialize;
use validator::Validate;

/// A registered account.
///
/// `password_hash` is read from the `password` column, which holds an Argon2id
/// PHC string (or cleartext for rows written before hashing was introduced).
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }
}

/// Input data for inserting a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Username/password pair submitted by the register and login forms.
#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Username and Password are required"))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, message = "Username and Password are required"))]
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
