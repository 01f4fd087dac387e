//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown email or wrong password. Both cases share this variant so
    /// callers cannot tell them apart.
    #[error("credentials don't match")]
    InvalidCredentials,

    #[error("a user with this email already exists")]
    DuplicateCredential,

    /// Missing, invalid or expired token, unknown user, or inactive user.
    #[error("authentication required")]
    Unauthenticated,

    #[error("user not found")]
    UserNotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password hashing error")]
    Password(#[from] PasswordError),

    #[error("token processing error")]
    Token(#[source] TokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateCredential,
            Some(_) | None => Self::Sql(error),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken => Self::Unauthenticated,
            other => Self::Token(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_becomes_unauthenticated() {
        let error = AuthServiceError::from(TokenError::InvalidToken);

        assert!(matches!(error, AuthServiceError::Unauthenticated));
    }

    #[test]
    fn row_not_found_is_an_opaque_store_error() {
        let error = AuthServiceError::from(Error::RowNotFound);

        assert!(matches!(error, AuthServiceError::Sql(_)));
    }
}
