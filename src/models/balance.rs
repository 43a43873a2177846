//! This file defines the derived `Balance` type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's financial position, derived from their transactions.
///
/// A balance is never stored: it is recomputed from the persisted
/// transactions on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The sum of all income transaction amounts.
    pub income: Decimal,
    /// The sum of all expense transaction amounts.
    pub expense: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

impl Balance {
    /// Create a balance from the income and expense totals.
    ///
    /// The net balance is derived as `income - expense`.
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            net: income - expense,
        }
    }
}

#[cfg(test)]
mod balance_tests {
    use rust_decimal::Decimal;

    use super::Balance;

    #[test]
    fn new_derives_net_balance() {
        let income: Decimal = "7000.00".parse().unwrap();
        let expense: Decimal = "2500.50".parse().unwrap();

        let balance = Balance::new(income, expense);

        assert_eq!(balance.net, "4499.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn new_with_zero_totals_gives_zero_net() {
        let balance = Balance::new(Decimal::ZERO, Decimal::ZERO);

        assert_eq!(balance.net, Decimal::ZERO);
    }
}
