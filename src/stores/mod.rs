//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Store operations that read or mutate a specific record take the acting
//! user's ID explicitly and apply a uniform ownership check: the resource
//! must exist (otherwise [Error::NotFound](crate::Error::NotFound)) and be
//! owned by the acting user (otherwise
//! [Error::Forbidden](crate::Error::Forbidden)), in that order, before any
//! mutation is applied.

mod category;
mod transaction;
mod user;

pub mod sqlite;

pub use category::CategoryStore;
pub use transaction::TransactionStore;
pub use user::UserStore;

use crate::{Error, models::UserID};

/// Check that `acting_user` owns a resource belonging to `owner`.
///
/// Comparison is by identifier equality. Callers must resolve the resource
/// first so that a missing resource reports [Error::NotFound] rather than
/// [Error::Forbidden].
pub(crate) fn ensure_owner(owner: UserID, acting_user: UserID) -> Result<(), Error> {
    if owner == acting_user {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}

#[cfg(test)]
mod ensure_owner_tests {
    use crate::{Error, models::UserID};

    use super::ensure_owner;

    #[test]
    fn accepts_matching_ids() {
        assert_eq!(Ok(()), ensure_owner(UserID::new(1), UserID::new(1)));
    }

    #[test]
    fn rejects_mismatched_ids() {
        assert_eq!(
            Err(Error::Forbidden),
            ensure_owner(UserID::new(1), UserID::new(2))
        );
    }
}
