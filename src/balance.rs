//! Computes account balances from stored transactions.

use crate::{
    Error,
    models::{Balance, TransactionType, UserID},
    stores::TransactionStore,
};

/// Compute the balance of `user_id`'s account.
///
/// Income and expense totals are aggregated separately with exact decimal
/// arithmetic, then the net is derived as income minus expenses. The result
/// is computed from the stored transactions on every call, so it is always
/// consistent with the current ledger.
///
/// # Errors
/// This function will return an error if the underlying store fails.
pub fn compute_balance<T: TransactionStore>(store: &T, user_id: UserID) -> Result<Balance, Error> {
    let income = store.sum_by_type(TransactionType::Income, user_id)?;
    let expense = store.sum_by_type(TransactionType::Expense, user_id)?;

    Ok(Balance::new(income, expense))
}

#[cfg(test)]
mod balance_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        db::initialize,
        models::{Amount, CategoryName, NewTransaction, PasswordHash, TransactionType, UserID, Username},
        stores::{
            CategoryStore, TransactionStore, UserStore,
            sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
        },
    };

    use super::compute_balance;

    fn get_test_store() -> (SQLiteTransactionStore, UserID, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let user = SQLiteUserStore::new(connection.clone())
            .create(
                Username::new("alice").unwrap(),
                PasswordHash::new_unchecked("hunter2"),
            )
            .unwrap();
        let category = SQLiteCategoryStore::new(connection.clone())
            .create(CategoryName::new_unchecked("General"), user.id())
            .unwrap();

        (
            SQLiteTransactionStore::new(connection),
            user.id(),
            category.id(),
        )
    }

    fn insert_transaction(
        store: &mut SQLiteTransactionStore,
        user_id: UserID,
        category_id: i64,
        raw_amount: &str,
        transaction_type: TransactionType,
    ) {
        store
            .create(
                NewTransaction {
                    description: "test".to_string(),
                    amount: Amount::new(raw_amount.parse::<Decimal>().unwrap()).unwrap(),
                    date: Some(date!(2024 - 06 - 01)),
                    transaction_type,
                    category_id,
                },
                user_id,
            )
            .unwrap();
    }

    #[test]
    fn balance_is_zero_without_transactions() {
        let (store, user_id, _) = get_test_store();

        let balance = compute_balance(&store, user_id).unwrap();

        assert_eq!(balance.income, Decimal::ZERO);
        assert_eq!(balance.expense, Decimal::ZERO);
        assert_eq!(balance.net, Decimal::ZERO);
    }

    #[test]
    fn balance_is_exact() {
        let (mut store, user_id, category_id) = get_test_store();
        insert_transaction(&mut store, user_id, category_id, "7000.00", TransactionType::Income);
        insert_transaction(&mut store, user_id, category_id, "2500.50", TransactionType::Expense);

        let balance = compute_balance(&store, user_id).unwrap();

        assert_eq!(balance.income, "7000.00".parse::<Decimal>().unwrap());
        assert_eq!(balance.expense, "2500.50".parse::<Decimal>().unwrap());
        assert_eq!(balance.net, "4499.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn balance_does_not_drift_over_many_small_amounts() {
        let (mut store, user_id, category_id) = get_test_store();

        for _ in 0..100 {
            insert_transaction(&mut store, user_id, category_id, "0.10", TransactionType::Expense);
        }

        let balance = compute_balance(&store, user_id).unwrap();

        assert_eq!(balance.expense, "10.00".parse::<Decimal>().unwrap());
        assert_eq!(balance.net, "-10.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn computing_the_balance_twice_gives_the_same_result() {
        let (mut store, user_id, category_id) = get_test_store();
        insert_transaction(&mut store, user_id, category_id, "12.34", TransactionType::Income);

        let first = compute_balance(&store, user_id).unwrap();
        let second = compute_balance(&store, user_id).unwrap();

        assert_eq!(first, second);
    }
}
