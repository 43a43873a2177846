//! Defines the app level error type and its translation to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
///
/// Domain operations raise these at the point of detection and propagate
/// them unmodified to the route handlers, which convert them to a response
/// via [IntoResponse].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The resource exists but is owned by a different user.
    ///
    /// The message is deliberately generic so that clients cannot learn why
    /// access was denied.
    #[error("you do not have permission to access this resource")]
    Forbidden,

    /// An empty or whitespace-only string was used as a category name.
    #[error("a category name cannot be empty")]
    EmptyCategoryName,

    /// An empty or whitespace-only string was used as a username.
    #[error("a username cannot be empty")]
    EmptyUsername,

    /// An empty password was supplied during registration.
    #[error("a password cannot be empty")]
    EmptyPassword,

    /// A transaction amount was zero or negative.
    ///
    /// Amounts are always positive; whether they count towards income or
    /// expenses is determined by the transaction type.
    #[error("a transaction amount must be greater than zero")]
    NonPositiveAmount,

    /// The username chosen during registration is already taken.
    #[error("the username is already in use")]
    DuplicateUsername,

    /// Tried to delete a category that transactions still refer to.
    #[error("the category is still in use by one or more transactions")]
    CategoryInUse,

    /// The user provided an invalid username/password combination.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The bearer token was missing, malformed, expired, or signed with the
    /// wrong key.
    #[error("invalid or missing authentication token")]
    InvalidToken,

    /// Could not sign a token for a successfully authenticated user.
    #[error("could not create an authentication token")]
    TokenCreation,

    /// An unexpected error occurred in the underlying hashing library.
    ///
    /// The error string should only be logged on the server, never sent to
    /// the client.
    #[error("hashing failed: {0}")]
    Hashing(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::Sql(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::EmptyCategoryName
            | Error::EmptyUsername
            | Error::EmptyPassword
            | Error::NonPositiveAmount => StatusCode::UNPROCESSABLE_ENTITY,
            Error::DuplicateUsername | Error::CategoryInUse => StatusCode::CONFLICT,
            Error::InvalidCredentials | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::Hashing(_) | Error::DatabaseLock | Error::TokenCreation | Error::Sql(_) => {
                tracing::error!("An unexpected error occurred: {self}");

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response();
            }
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn not_found_maps_to_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = Error::Forbidden.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_errors_map_to_422() {
        for error in [
            Error::EmptyCategoryName,
            Error::EmptyUsername,
            Error::EmptyPassword,
            Error::NonPositiveAmount,
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn duplicate_username_maps_to_409() {
        let response = Error::DuplicateUsername.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_token_maps_to_401() {
        let response = Error::InvalidToken.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn sql_error_maps_to_500() {
        let response = Error::Sql(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_returned_no_rows_converts_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
