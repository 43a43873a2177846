//! This file defines the route handler for registering new users.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{PasswordHash, Username},
    state::AppState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

/// The data for creating a new user account.
#[derive(Debug, Deserialize)]
pub struct RegisterData {
    /// The username for the new account.
    pub username: String,
    /// The raw password for the new account.
    pub password: String,
}

/// A user as sent back to clients.
///
/// The password hash is never part of a response.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// The ID of the user.
    pub id: i64,
    /// The username of the user.
    pub username: String,
}

/// A route handler for registering a new user.
///
/// # Errors
///
/// Returns a 422 response if the username or password is empty, a 409
/// response if the username is already taken, or a 500 response if hashing
/// or the database fails.
pub async fn create_user<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    Json(register_data): Json<RegisterData>,
) -> Result<(StatusCode, Json<UserResponse>), Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let username = Username::new(&register_data.username)?;
    let password_hash = PasswordHash::new(&register_data.password, PasswordHash::DEFAULT_COST)?;

    let user = state.user_store.create(username, password_hash)?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id().as_i64(),
            username: user.username().to_string(),
        }),
    ))
}
