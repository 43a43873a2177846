//! This file defines the type `Transaction`, the core type of the
//! bookkeeping part of the application, along with its validated amount and
//! type enumeration.

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// A strictly positive amount of money.
///
/// Whether an amount counts towards income or expenses is determined by the
/// transaction's [TransactionType], never by the sign of the stored value.
/// Amounts use exact decimal arithmetic so that aggregation never suffers
/// floating point rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns [Error::NonPositiveAmount] if `value` is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO {
            Err(Error::NonPositiveAmount)
        } else {
            Ok(Self(value))
        }
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is strictly positive. This
    /// function has `_unchecked` in the name but is not `unsafe`, because
    /// violating the positive invariant causes incorrect behaviour but does
    /// not affect memory safety.
    pub fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// The underlying decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a transaction brings money in or takes money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money earned, e.g. wages.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl TransactionType {
    /// The string stored in the database for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// The owner of a transaction always equals the owner of its referenced
/// category; the stores uphold this on creation and on every category
/// reassignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    description: String,
    amount: Amount,
    date: Date,
    transaction_type: TransactionType,
    category_id: DatabaseID,
    user_id: UserID,
}

impl Transaction {
    /// Create a transaction object from its parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DatabaseID,
        description: String,
        amount: Amount,
        date: Date,
        transaction_type: TransactionType,
        category_id: DatabaseID,
        user_id: UserID,
    ) -> Self {
        Self {
            id,
            description,
            amount,
            date,
            transaction_type,
            category_id,
            user_id,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> &Date {
        &self.date
    }

    /// Whether this transaction is an income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The ID of the category this transaction belongs to.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The ID of the user that owns this transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}

/// The data needed to create a transaction.
///
/// The owner is never part of this type: stores set it from the acting user
/// so that callers cannot spoof ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Amount,
    /// When the transaction happened. Today is used when absent.
    pub date: Option<Date>,
    /// Whether the transaction is an income or an expense.
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: DatabaseID,
}

/// The data applied when updating a transaction.
///
/// Updates use full-replace semantics: description, amount, date, and type
/// are always overwritten from this payload, so callers must resend fields
/// they want to keep. An absent date is replaced with today, matching the
/// default on create. `category_id` is the exception: `None` leaves the
/// current category untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// The new description.
    pub description: String,
    /// The new amount.
    pub amount: Amount,
    /// The new date. Today is used when absent.
    pub date: Option<Date>,
    /// The new transaction type.
    pub transaction_type: TransactionType,
    /// The category to move the transaction to, if any.
    pub category_id: Option<DatabaseID>,
}

#[cfg(test)]
mod amount_tests {
    use rust_decimal::Decimal;

    use crate::Error;

    use super::Amount;

    #[test]
    fn new_fails_on_zero() {
        assert_eq!(Amount::new(Decimal::ZERO), Err(Error::NonPositiveAmount));
    }

    #[test]
    fn new_fails_on_negative_value() {
        let value: Decimal = "-0.01".parse().unwrap();

        assert_eq!(Amount::new(value), Err(Error::NonPositiveAmount));
    }

    #[test]
    fn new_succeeds_on_positive_value() {
        let value: Decimal = "1234.56".parse().unwrap();

        let amount = Amount::new(value).unwrap();

        assert_eq!(amount.as_decimal(), value);
    }
}
