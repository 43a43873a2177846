//! This module defines the domain data types.

pub use balance::Balance;
pub use category::{Category, CategoryName};
pub use password::PasswordHash;
pub use transaction::{Amount, NewTransaction, Transaction, TransactionType, TransactionUpdate};
pub use user::{User, UserID, Username};

mod balance;
mod category;
mod password;
mod transaction;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
