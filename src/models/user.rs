//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, models::PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors, and more flexible generics that can have
/// distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user registers and signs in with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Username(String);

impl Username {
    /// Create a username, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyUsername] if `name` is empty or whitespace-only.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyUsername)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a username without validation.
    ///
    /// The caller should ensure that the string is not empty. This function
    /// has `_unchecked` in the name but is not `unsafe`, because violating
    /// the non-empty invariant causes incorrect behaviour but does not
    /// affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user of the application.
///
/// Users own [categories](crate::models::Category) and
/// [transactions](crate::models::Transaction); all access to those resources
/// is checked against the owner's ID.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    username: Username,
    password_hash: PasswordHash,
}

impl User {
    /// Create a user object from its parts.
    pub fn new(id: UserID, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The name the user signs in with.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

#[cfg(test)]
mod username_tests {
    use crate::Error;

    use super::Username;

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(Username::new(""), Err(Error::EmptyUsername));
    }

    #[test]
    fn new_fails_on_whitespace_only_string() {
        assert_eq!(Username::new("   \t"), Err(Error::EmptyUsername));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let username = Username::new("  alice ").unwrap();

        assert_eq!(username.as_ref(), "alice");
    }
}
