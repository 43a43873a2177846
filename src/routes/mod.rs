//! Defines the REST API routes and how they map to the route handlers.

pub mod endpoints;

mod balance;
mod category;
mod register;
mod transaction;

pub use balance::get_balance;
pub use category::{
    CategoryData, create_category, delete_category, get_categories, get_category, update_category,
};
pub use register::{RegisterData, UserResponse, create_user};
pub use transaction::{
    TransactionData, TransactionUpdateData, create_transaction, delete_transaction,
    get_transaction, get_transactions, update_transaction,
};

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{
    auth::sign_in,
    logging::logging_middleware,
    state::AppState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

/// Return the router with all the app's routes.
///
/// Routes that take a bearer token reject requests without a valid one, so
/// every category, transaction, and balance operation is scoped to the
/// authenticated user.
pub fn build_router<C, T, U>(state: AppState<C, T, U>) -> Router
where
    C: CategoryStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::REGISTER, post(create_user))
        .route(endpoints::LOG_IN, post(sign_in))
        .route(
            endpoints::CATEGORIES,
            post(create_category).get(get_categories),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction).get(get_transactions),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route(endpoints::BALANCE, get(get_balance))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
