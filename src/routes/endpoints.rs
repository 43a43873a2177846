//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}',
//! use [format_endpoint].

/// The route for registering new users.
pub const REGISTER: &str = "/auth/register";
/// The route for signing in and obtaining a bearer token.
pub const LOG_IN: &str = "/auth/login";
/// The route to access categories.
pub const CATEGORIES: &str = "/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route to access transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to fetch the acting user's balance.
pub const BALANCE: &str = "/balance";

/// Replace the first path parameter in `endpoint_path` with `id`.
///
/// This function assumes that an endpoint path has at most one parameter.
///
/// # Examples
///
/// ```
/// use ledgerly::routes::endpoints::format_endpoint;
///
/// assert_eq!(
///     format_endpoint("/categories/{category_id}", 42),
///     "/categories/42"
/// );
/// ```
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            format!(
                "{}{}{}",
                &endpoint_path[..start],
                id,
                &endpoint_path[end + 1..]
            )
        }
        _ => endpoint_path.to_string(),
    }
}

// These tests are here so that we know the routes will parse as URIs.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::routes::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn formatted_endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::CATEGORY, 1));
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::TRANSACTION, 1));
        assert_endpoint_is_valid_uri(endpoints::BALANCE);
    }

    #[test]
    fn format_endpoint_replaces_parameter() {
        assert_eq!(format_endpoint("/hello/{world_id}", 1), "/hello/1");
    }

    #[test]
    fn format_endpoint_leaves_plain_path_unchanged() {
        assert_eq!(format_endpoint("/hello", 1), "/hello");
    }
}
