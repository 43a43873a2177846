//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{PasswordHash, User, UserID, Username},
    stores::UserStore,
};

/// Handles the creation and retrieval of users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateUsername] if the username is already taken,
    /// or [Error::Sql] if an SQL related error occurred.
    fn create(&mut self, username: Username, password_hash: PasswordHash) -> Result<User, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO user (username, password) VALUES (?1, ?2)",
            (username.as_ref(), password_hash.to_string()),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(id, username, password_hash))
    }

    /// Get the user from the database that has the specified `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified ID,
    /// or [Error::Sql] if there are SQL related errors.
    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare("SELECT id, username, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified `username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no user with the specified
    /// username, or [Error::Sql] if there are SQL related errors.
    fn get_by_username(&self, username: &Username) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare("SELECT id, username, password FROM user WHERE username = :username")?
            .query_row(&[(":username", &username.as_ref())], Self::map_row)
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    username TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let raw_username: String = row.get(offset + 1)?;
        let raw_password_hash: String = row.get(offset + 2)?;

        let id = UserID::new(raw_id);
        let username = Username::new_unchecked(&raw_username);
        let password_hash = PasswordHash::new_unchecked(&raw_password_hash);

        Ok(User::new(id, username, password_hash))
    }
}

#[cfg(test)]
mod user_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{PasswordHash, Username},
        stores::UserStore,
    };

    use super::SQLiteUserStore;

    fn get_test_store() -> SQLiteUserStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_user_succeeds() {
        let mut store = get_test_store();
        let username = Username::new("alice").unwrap();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let user = store.create(username.clone(), password_hash.clone()).unwrap();

        assert!(user.id().as_i64() > 0);
        assert_eq!(user.username(), &username);
        assert_eq!(user.password_hash(), &password_hash);
    }

    #[test]
    fn create_user_fails_on_duplicate_username() {
        let mut store = get_test_store();
        let username = Username::new("alice").unwrap();

        store
            .create(username.clone(), PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        assert_eq!(
            store.create(username, PasswordHash::new_unchecked("hunter3")),
            Err(Error::DuplicateUsername)
        );
    }

    #[test]
    fn get_user_by_id_succeeds() {
        let mut store = get_test_store();
        let inserted_user = store
            .create(
                Username::new("alice").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        let selected_user = store.get(inserted_user.id());

        assert_eq!(Ok(inserted_user), selected_user);
    }

    #[test]
    fn get_user_by_username_succeeds() {
        let mut store = get_test_store();
        let inserted_user = store
            .create(
                Username::new("alice").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();

        let selected_user = store.get_by_username(inserted_user.username());

        assert_eq!(Ok(inserted_user), selected_user);
    }

    #[test]
    fn get_user_fails_with_non_existent_username() {
        let store = get_test_store();
        let username = Username::new("nobody").unwrap();

        assert_eq!(store.get_by_username(&username), Err(Error::NotFound));
    }
}
