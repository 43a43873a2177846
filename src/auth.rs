//! Implements sign-in with JSON Web Tokens (JWT) and the extractor that
//! protects routes behind a valid token.
//!
//! Handlers that take a [Claims] argument can only be reached with a valid
//! bearer token; the token carries the acting user's identity, which the
//! stores use for their ownership checks.

use axum::{
    Json, RequestPartsExt,
    extract::{FromRef, FromRequestParts, State},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    models::{UserID, Username},
    state::AuthState,
    stores::{CategoryStore, TransactionStore, UserStore},
};

// Code in this module is adapted from https://github.com/ezesundayeze/axum--auth and https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
    /// The ID of the user the token was issued to.
    pub sub: i64,
    /// The username of the user the token was issued to.
    pub username: String,
}

impl Claims {
    /// The ID of the acting user.
    pub fn user_id(&self) -> UserID {
        UserID::new(self.sub)
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let auth_state = AuthState::from_ref(state);
        let token_data = decode_jwt(bearer.token(), &auth_state.decoding_key)?;

        Ok(token_data.claims)
    }
}

/// The username and password entered during sign-in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Username entered during sign-in.
    pub username: String,
    /// Password entered during sign-in.
    pub password: String,
}

/// Handler for sign-in requests.
///
/// On success the response body is `{"token": "..."}`.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the username does not belong to a
/// registered user or the password does not match. Both cases produce the
/// same response, so a caller cannot probe which usernames exist.
pub async fn sign_in<C, T, U>(
    State(state): State<AppState<C, T, U>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, Error>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let username =
        Username::new(&credentials.username).map_err(|_| Error::InvalidCredentials)?;
    let user = state
        .user_store
        .get_by_username(&username)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    let password_is_correct = user
        .password_hash()
        .verify(&credentials.password)
        .map_err(|error| Error::Hashing(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_jwt(user.id(), user.username().as_ref(), state.encoding_key())?;

    Ok(Json(json!({ "token": token })))
}

/// How long a token stays valid after it is issued.
const TOKEN_LIFETIME: Duration = Duration::minutes(15);

pub(crate) fn encode_jwt(
    user_id: UserID,
    username: &str,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now + TOKEN_LIFETIME).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        sub: user_id.as_i64(),
        username: username.to_owned(),
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|_| Error::TokenCreation)
}

pub(crate) fn decode_jwt(
    jwt_token: &str,
    decoding_key: &DecodingKey,
) -> Result<TokenData<Claims>, Error> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|_| Error::InvalidToken)
}

#[cfg(test)]
mod jwt_tests {
    use jsonwebtoken::{DecodingKey, EncodingKey};

    use crate::models::UserID;

    use super::{decode_jwt, encode_jwt};

    fn get_test_keys() -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret("foobar".as_bytes()),
            DecodingKey::from_secret("foobar".as_bytes()),
        )
    }

    #[test]
    fn decode_jwt_gives_back_user_identity() {
        let (encoding_key, decoding_key) = get_test_keys();
        let user_id = UserID::new(42);

        let jwt = encode_jwt(user_id, "alice", &encoding_key).unwrap();
        let claims = decode_jwt(&jwt, &decoding_key).unwrap().claims;

        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn decode_jwt_fails_with_wrong_key() {
        let (encoding_key, _) = get_test_keys();
        let wrong_key = DecodingKey::from_secret("not the secret".as_bytes());

        let jwt = encode_jwt(UserID::new(42), "alice", &encoding_key).unwrap();

        assert!(decode_jwt(&jwt, &wrong_key).is_err());
    }

    #[test]
    fn decode_jwt_fails_with_garbage_token() {
        let (_, decoding_key) = get_test_keys();

        assert!(decode_jwt("definitely.not.ajwt", &decoding_key).is_err());
    }
}
