//! This file defines the type that handles password hashing and
//! verification.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a raw password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed
    /// to verify a password. Pass in [PasswordHash::DEFAULT_COST] to use the
    /// recommended cost; tests use a lower cost to stay fast.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyPassword] if `raw_password` is empty, or
    /// [Error::Hashing] if the underlying hashing library fails.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        if raw_password.trim().is_empty() {
            return Err(Error::EmptyPassword);
        }

        match hash(raw_password, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(error) => Err(Error::Hashing(error.to_string())),
        }
    }

    /// Create a `PasswordHash` from an existing hash string without
    /// re-hashing.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid bcrypt
    /// hash, e.g. one previously stored in the database.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_hash_tests {
    use crate::Error;

    use super::PasswordHash;

    #[test]
    fn new_fails_on_empty_password() {
        assert_eq!(PasswordHash::new("", 4), Err(Error::EmptyPassword));
    }

    #[test]
    fn hash_password_produces_verifiable_hash() {
        let password = "averysafeandsecurepassword";
        let wrong_password = "thewrongpassword";

        let hash = PasswordHash::new(password, 4).unwrap();

        assert!(hash.verify(password).unwrap());
        assert!(!hash.verify(wrong_password).unwrap());
    }

    #[test]
    fn hash_duplicate_password_produces_unique_hash() {
        let password = "turkeysgogobblegobble";

        let hash = PasswordHash::new(password, 4).unwrap();
        let dupe_hash = PasswordHash::new(password, 4).unwrap();

        assert_ne!(hash, dupe_hash);
    }
}
