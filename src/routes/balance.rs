//! This file defines the API route for the account balance.

use axum::{Json, extract::State};

use crate::{
    Error,
    auth::Claims,
    balance::compute_balance,
    models::Balance,
    state::AppState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

/// A route handler for fetching the acting user's balance.
///
/// The balance is recomputed from the stored transactions on every call.
pub async fn get_balance<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    claims: Claims,
) -> Result<Json<Balance>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let balance = compute_balance(&state.transaction_store, claims.user_id())?;

    Ok(Json(balance))
}
