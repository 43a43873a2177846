//! Defines the transaction store trait.

use rust_decimal::Decimal;

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, TransactionType, TransactionUpdate, UserID},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction owned by `user_id`.
    ///
    /// The referenced category is resolved from
    /// [NewTransaction::category_id] and its owner checked against
    /// `user_id`; the stored transaction's owner is always `user_id`
    /// regardless of the payload.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the category does not exist, or
    /// [Error::Forbidden] if the category is owned by a different user.
    fn create(&mut self, new_transaction: NewTransaction, user_id: UserID)
    -> Result<Transaction, Error>;

    /// Get a transaction by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `transaction_id` does not resolve, or
    /// [Error::Forbidden] if the transaction is owned by a different user.
    fn get(&self, transaction_id: DatabaseID, acting_user: UserID) -> Result<Transaction, Error>;

    /// Get all transactions owned by `user_id`.
    ///
    /// Returns an empty vector if the user has no transactions.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Update a transaction.
    ///
    /// Description, amount, date, and type are overwritten unconditionally
    /// (full-replace semantics, see [TransactionUpdate]). If
    /// [TransactionUpdate::category_id] is present and differs from the
    /// current category, the new category is resolved and its owner checked
    /// before the transaction is moved.
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
    ) -> Result<Transaction, Error>;

    /// Delete a transaction by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `transaction_id` does not resolve, or
    /// [Error::Forbidden] if the transaction is owned by a different user.
    fn delete(&mut self, transaction_id: DatabaseID, acting_user: UserID) -> Result<(), Error>;

    /// Sum the amounts of all of `user_id`'s transactions with the given
    /// type.
    ///
    /// Returns zero if the user has no matching transactions. The sum uses
    /// exact decimal arithmetic.
    fn sum_by_type(
        &self,
        transaction_type: TransactionType,
        user_id: UserID,
    ) -> Result<Decimal, Error>;
}
