//! This file defines the API routes for the transaction type.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    auth::Claims,
    models::{Amount, DatabaseID, NewTransaction, Transaction, TransactionType, TransactionUpdate},
    state::AppState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

/// The data for creating a transaction.
///
/// The owner is never part of this payload, it is always taken from the
/// bearer token.
#[derive(Debug, Deserialize)]
pub struct TransactionData {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// When the transaction happened. Today is used when absent.
    pub date: Option<Date>,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: DatabaseID,
}

/// The data for updating a transaction.
///
/// Like on create, the owner is always taken from the bearer token.
#[derive(Debug, Deserialize)]
pub struct TransactionUpdateData {
    /// The new description.
    pub description: String,
    /// The new amount.
    pub amount: Decimal,
    /// The new date. Today is used when absent.
    pub date: Option<Date>,
    /// The new transaction type.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category to move the transaction to. An absent ID leaves the
    /// current category untouched.
    pub category_id: Option<DatabaseID>,
}

/// A route handler for creating a new transaction.
///
/// The transaction is owned by the acting user; its category must exist and
/// belong to the acting user as well.
pub async fn create_transaction<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Json(transaction_data): Json<TransactionData>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let new_transaction = NewTransaction {
        description: transaction_data.description,
        amount: Amount::new(transaction_data.amount)?,
        date: transaction_data.date,
        transaction_type: transaction_data.transaction_type,
        category_id: transaction_data.category_id,
    };

    let transaction = state
        .transaction_store
        .create(new_transaction, claims.user_id())?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for getting a transaction by its database ID.
pub async fn get_transaction<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<Transaction>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transaction = state
        .transaction_store
        .get(transaction_id, claims.user_id())?;

    Ok(Json(transaction))
}

/// A route handler for listing the acting user's transactions.
pub async fn get_transactions<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    claims: Claims,
) -> Result<Json<Vec<Transaction>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transactions = state.transaction_store.get_by_user(claims.user_id())?;

    Ok(Json(transactions))
}

/// A route handler for updating a transaction.
///
/// Description, amount, date, and type are overwritten from the payload. An
/// absent category ID leaves the current category untouched.
pub async fn update_transaction<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
    Json(transaction_data): Json<TransactionUpdateData>,
) -> Result<Json<Transaction>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let changes = TransactionUpdate {
        description: transaction_data.description,
        amount: Amount::new(transaction_data.amount)?,
        date: transaction_data.date,
        transaction_type: transaction_data.transaction_type,
        category_id: transaction_data.category_id,
    };

    let transaction =
        state
            .transaction_store
            .update(transaction_id, changes, claims.user_id())?;

    Ok(Json(transaction))
}

/// A route handler for deleting a transaction.
pub async fn delete_transaction<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    state
        .transaction_store
        .delete(transaction_id, claims.user_id())?;

    Ok(StatusCode::NO_CONTENT)
}
