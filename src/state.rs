//! Defines the shared application state and its sub-states.

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::stores::{CategoryStore, TransactionStore, UserStore};

/// The state of the REST server, shared between all routes.
///
/// The JWT keys do not implement `Debug`, so neither does this type.
#[derive(Clone)]
pub struct AppState<C, T, U>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    /// The key used to sign JSON Web Tokens.
    encoding_key: EncodingKey,
    /// The key used to verify JSON Web Tokens.
    decoding_key: DecodingKey,
    /// The store for transaction categories.
    pub category_store: C,
    /// The store for income and expense transactions.
    pub transaction_store: T,
    /// The store for registered users.
    pub user_store: U,
}

impl<C, T, U> AppState<C, T, U>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    /// Create the application state, deriving the JWT keys from
    /// `jwt_secret`.
    pub fn new(jwt_secret: &str, category_store: C, transaction_store: T, user_store: U) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            category_store,
            transaction_store,
            user_store,
        }
    }

    /// The key used to sign JSON Web Tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The key used to verify JSON Web Tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// The state needed to verify JSON Web Tokens on protected routes.
#[derive(Clone)]
pub struct AuthState {
    /// The key used to verify JSON Web Tokens.
    pub decoding_key: DecodingKey,
}

impl<C, T, U> FromRef<AppState<C, T, U>> for AuthState
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, U>) -> Self {
        Self {
            decoding_key: state.decoding_key.clone(),
        }
    }
}

#[cfg(test)]
mod state_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::FromRef;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
    };

    use super::{AppState, AuthState};

    // Axum clones the state for each request, so the state and its
    // sub-states must be cloneable despite the JWT keys they hold.
    #[test]
    fn state_can_be_cloned_for_sharing_across_requests() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let state = AppState::new(
            "foobar",
            SQLiteCategoryStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection.clone()),
            SQLiteUserStore::new(connection),
        );

        let _cloned_state = state.clone();
        let _auth_state = AuthState::from_ref(&state);
    }
}
