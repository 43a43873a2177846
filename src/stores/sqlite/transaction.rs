//! Implements a SQLite backed transaction store.
//!
//! Note that because a transaction depends on the
//! [User](crate::models::User) and [Category](crate::models::Category)
//! models, these models must be set up in the database.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{
        Amount, DatabaseID, NewTransaction, Transaction, TransactionType, TransactionUpdate,
        UserID,
    },
    stores::{TransactionStore, ensure_owner, sqlite::SQLiteCategoryStore},
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn select(
        connection: &Connection,
        transaction_id: DatabaseID,
    ) -> Result<Transaction, Error> {
        connection
            .prepare(
                "SELECT id, description, amount, date, transaction_type, category_id, user_id \
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &transaction_id)], Self::map_row)
            .map_err(|error| error.into())
    }
}

/// Amounts are stored as text and parsed back into [Decimal] so that no
/// value ever passes through binary floating point.
fn parse_stored_amount(raw_amount: &str, column: usize) -> Result<Decimal, rusqlite::Error> {
    raw_amount.parse::<Decimal>().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
    })
}

fn parse_stored_type(raw_type: &str, column: usize) -> Result<TransactionType, rusqlite::Error> {
    match raw_type {
        "INCOME" => Ok(TransactionType::Income),
        "EXPENSE" => Ok(TransactionType::Expense),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Text,
            format!("invalid transaction type {other:?}").into(),
        )),
    }
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The referenced category is resolved and its ownership checked before
    /// anything is written; the stored owner is always `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if the referenced category does not exist,
    /// - [Error::Forbidden] if the category is owned by a different user,
    /// - or [Error::Sql] if there is some other SQL error.
    fn create(
        &mut self,
        new_transaction: NewTransaction,
        user_id: UserID,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let category = SQLiteCategoryStore::select(&sql_transaction, new_transaction.category_id)?;
        ensure_owner(category.user_id(), user_id)?;

        let date = new_transaction.date.unwrap_or_else(today);

        sql_transaction.execute(
            "INSERT INTO \"transaction\" \
             (description, amount, date, transaction_type, category_id, user_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &new_transaction.description,
                new_transaction.amount.as_decimal().to_string(),
                date,
                new_transaction.transaction_type.as_str(),
                category.id(),
                user_id.as_i64(),
            ),
        )?;

        let id = sql_transaction.last_insert_rowid();
        sql_transaction.commit()?;

        Ok(Transaction::new(
            id,
            new_transaction.description,
            new_transaction.amount,
            date,
            new_transaction.transaction_type,
            category.id(),
            user_id,
        ))
    }

    /// Retrieve the transaction with `transaction_id` from the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist, or
    /// [Error::Forbidden] if it is owned by a different user.
    fn get(&self, transaction_id: DatabaseID, acting_user: UserID) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let transaction = Self::select(&connection, transaction_id)?;
        ensure_owner(transaction.user_id(), acting_user)?;

        Ok(transaction)
    }

    /// Retrieve all of `user_id`'s transactions from the database.
    ///
    /// An empty vector is returned if the specified user has no
    /// transactions.
    ///
    /// # Errors
    /// This function will return an [Error::Sql] if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, description, amount, date, transaction_type, category_id, user_id \
                 FROM \"transaction\" WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Update the transaction with `transaction_id`.
    ///
    /// Description, amount, date, and type are overwritten unconditionally
    /// (full-replace semantics). A changed category is resolved and its
    /// ownership checked before the transaction is moved.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction or the new category does
    /// not exist, or [Error::Forbidden] if either is owned by a different
    /// user. On any error the stored transaction is left unchanged.
    fn update(
        &mut self,
        transaction_id: DatabaseID,
        changes: TransactionUpdate,
        acting_user: UserID,
    ) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let existing = Self::select(&sql_transaction, transaction_id)?;
        ensure_owner(existing.user_id(), acting_user)?;

        let category_id = match changes.category_id {
            Some(new_category_id) if new_category_id != existing.category_id() => {
                let new_category =
                    SQLiteCategoryStore::select(&sql_transaction, new_category_id)?;
                ensure_owner(new_category.user_id(), acting_user)?;

                new_category.id()
            }
            _ => existing.category_id(),
        };

        let date = changes.date.unwrap_or_else(today);

        sql_transaction.execute(
            "UPDATE \"transaction\" \
             SET description = ?1, amount = ?2, date = ?3, transaction_type = ?4, \
                 category_id = ?5 \
             WHERE id = ?6",
            (
                &changes.description,
                changes.amount.as_decimal().to_string(),
                date,
                changes.transaction_type.as_str(),
                category_id,
                transaction_id,
            ),
        )?;

        sql_transaction.commit()?;

        Ok(Transaction::new(
            transaction_id,
            changes.description,
            changes.amount,
            date,
            changes.transaction_type,
            category_id,
            existing.user_id(),
        ))
    }

    /// Delete the transaction with `transaction_id` from the database.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist, or
    /// [Error::Forbidden] if it is owned by a different user.
    fn delete(&mut self, transaction_id: DatabaseID, acting_user: UserID) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let sql_transaction = connection.unchecked_transaction()?;

        let existing = Self::select(&sql_transaction, transaction_id)?;
        ensure_owner(existing.user_id(), acting_user)?;

        sql_transaction.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1",
            (transaction_id,),
        )?;

        sql_transaction.commit()?;

        Ok(())
    }

    /// Sum the amounts of all of `user_id`'s transactions with the given
    /// type.
    ///
    /// The amounts are summed in Rust because SQLite's SUM would go through
    /// floating point.
    ///
    /// # Errors
    /// This function will return an [Error::Sql] if there is an SQL error.
    fn sum_by_type(
        &self,
        transaction_type: TransactionType,
        user_id: UserID,
    ) -> Result<Decimal, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let mut statement = connection.prepare(
            "SELECT amount FROM \"transaction\" \
             WHERE transaction_type = ?1 AND user_id = ?2",
        )?;
        let raw_amounts = statement.query_map(
            (transaction_type.as_str(), user_id.as_i64()),
            |row| row.get::<_, String>(0),
        )?;

        let mut total = Decimal::ZERO;

        for raw_amount in raw_amounts {
            total += parse_stored_amount(&raw_amount?, 0)?;
        }

        Ok(total)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                transaction_type TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id),
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let description: String = row.get(offset + 1)?;

        let raw_amount: String = row.get(offset + 2)?;
        let amount = Amount::new_unchecked(parse_stored_amount(&raw_amount, offset + 2)?);

        let date = row.get(offset + 3)?;

        let raw_type: String = row.get(offset + 4)?;
        let transaction_type = parse_stored_type(&raw_type, offset + 4)?;

        let category_id = row.get(offset + 5)?;
        let user_id = UserID::new(row.get(offset + 6)?);

        Ok(Transaction::new(
            id,
            description,
            amount,
            date,
            transaction_type,
            category_id,
            user_id,
        ))
    }
}
