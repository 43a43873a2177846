//! This file defines the API routes for the category type.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    Error,
    auth::Claims,
    models::{Category, CategoryName, DatabaseID},
    state::AppState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

/// The data for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryData {
    /// The name of the category.
    pub name: String,
}

/// A route handler for creating a new category.
///
/// The new category is owned by the acting user.
pub async fn create_category<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Json(new_category): Json<CategoryData>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let name = CategoryName::new(&new_category.name)?;

    let category = state.category_store.create(name, claims.user_id())?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// A route handler for getting a category by its database ID.
pub async fn get_category<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(category_id): Path<DatabaseID>,
) -> Result<Json<Category>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let category = state.category_store.get(category_id, claims.user_id())?;

    Ok(Json(category))
}

/// A route handler for listing the acting user's categories.
pub async fn get_categories<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    claims: Claims,
) -> Result<Json<Vec<Category>>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let categories = state.category_store.get_by_user(claims.user_id())?;

    Ok(Json(categories))
}

/// A route handler for renaming a category.
pub async fn update_category<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(category_id): Path<DatabaseID>,
    Json(category_data): Json<CategoryData>,
) -> Result<Json<Category>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let name = CategoryName::new(&category_data.name)?;

    let category = state
        .category_store
        .rename(category_id, name, claims.user_id())?;

    Ok(Json(category))
}

/// A route handler for deleting a category.
///
/// Responds with 409 if transactions still reference the category.
pub async fn delete_category<C, T, U>(
    State(mut state): State<AppState<C, T, U>>,
    claims: Claims,
    Path(category_id): Path<DatabaseID>,
) -> Result<StatusCode, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    state.category_store.delete(category_id, claims.user_id())?;

    Ok(StatusCode::NO_CONTENT)
}
