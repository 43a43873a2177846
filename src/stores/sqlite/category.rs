//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, UserID},
    stores::{CategoryStore, ensure_owner},
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Resolve a category by ID within an already held connection.
    ///
    /// Keeping resolution on the shared connection lets the stores check
    /// ownership and persist within the same critical section.
    pub(crate) fn select(
        connection: &Connection,
        category_id: DatabaseID,
    ) -> Result<Category, Error> {
        connection
            .prepare("SELECT id, name, user_id FROM category WHERE id = :id")?
            .query_row(&[(":id", &category_id)], Self::map_row)
            .map_err(|error| error.into())
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&mut self, name: CategoryName, user_id: UserID) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO category (name, user_id) VALUES (?1, ?2)",
            (name.as_ref(), user_id.as_i64()),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(id, name, user_id))
    }

    /// Retrieve the category with `category_id` from the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist, or
    /// [Error::Forbidden] if it is owned by a different user.
    fn get(&self, category_id: DatabaseID, acting_user: UserID) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let category = Self::select(&connection, category_id)?;
        ensure_owner(category.user_id(), acting_user)?;

        Ok(category)
    }

    /// Retrieve all of `user_id`'s categories from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare("SELECT id, name, user_id FROM category WHERE user_id = :user_id")?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Rename the category with `category_id`.
    ///
    /// The owner is left untouched.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist, or
    /// [Error::Forbidden] if it is owned by a different user. On error no
    /// change is persisted.
    fn rename(
        &mut self,
        category_id: DatabaseID,
        name: CategoryName,
        acting_user: UserID,
    ) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let category = Self::select(&sql_transaction, category_id)?;
        ensure_owner(category.user_id(), acting_user)?;

        sql_transaction.execute(
            "UPDATE category SET name = ?1 WHERE id = ?2",
            (name.as_ref(), category_id),
        )?;

        sql_transaction.commit()?;

        Ok(Category::new(category_id, name, category.user_id()))
    }

    /// Delete the category with `category_id` from the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist,
    /// [Error::Forbidden] if it is owned by a different user, or
    /// [Error::CategoryInUse] if transactions still reference it.
    fn delete(&mut self, category_id: DatabaseID, acting_user: UserID) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let category = Self::select(&sql_transaction, category_id)?;
        ensure_owner(category.user_id(), acting_user)?;

        sql_transaction
            .execute("DELETE FROM category WHERE id = ?1", (category_id,))
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                // The category is still referenced by transactions.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 787 =>
                {
                    Error::CategoryInUse
                }
                error => error.into(),
            })?;

        sql_transaction.commit()?;

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let user_id = UserID::new(row.get(offset + 2)?);

        Ok(Category::new(id, name, user_id))
    }
}
