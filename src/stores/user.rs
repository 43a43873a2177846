//! Defines the user store trait.

use crate::{
    Error,
    models::{PasswordHash, User, UserID, Username},
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateUsername] if the username is already taken.
    fn create(&mut self, username: Username, password_hash: PasswordHash) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// Returns [Error::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their username.
    ///
    /// Returns [Error::NotFound] if no user with the given username exists.
    fn get_by_username(&self, username: &Username) -> Result<User, Error>;
}
