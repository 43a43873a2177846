//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, UserID},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Create a new category owned by `user_id`.
    ///
    /// The owner is always the acting user; callers cannot create categories
    /// on behalf of someone else.
    fn create(&mut self, name: CategoryName, user_id: UserID) -> Result<Category, Error>;

    /// Get a category by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not resolve, or
    /// [Error::Forbidden] if the category is owned by a different user.
    fn get(&self, category_id: DatabaseID, acting_user: UserID) -> Result<Category, Error>;

    /// Get all categories owned by `user_id`.
    ///
    /// Returns an empty vector if the user has no categories.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Rename a category.
    ///
    /// The owner is never changed by an update.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not resolve, or
    /// [Error::Forbidden] if the category is owned by a different user.
    fn rename(
        &mut self,
        category_id: DatabaseID,
        name: CategoryName,
        acting_user: UserID,
    ) -> Result<Category, Error>;

    /// Delete a category by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `category_id` does not resolve,
    /// [Error::Forbidden] if the category is owned by a different user, or
    /// [Error::CategoryInUse] if transactions still reference the category.
    fn delete(&mut self, category_id: DatabaseID, acting_user: UserID) -> Result<(), Error>;
}
