//! Signed identity tokens.

use std::{fmt, time::Duration};

use jiff::Timestamp;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::{Error as JwtError, ErrorKind},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::UserUuid;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token payload. Only the user id is carried; roles and active status are
/// always re-read from storage when the token is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    #[must_use]
    pub fn user_uuid(&self) -> UserUuid {
        UserUuid::from_uuid(self.id)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret must not be empty")]
    EmptySecret,

    #[error("token lifetime is out of range")]
    InvalidLifetime,

    #[error("failed to sign token")]
    Encode(#[source] JwtError),

    #[error("token is invalid or expired")]
    InvalidToken,
}

/// Process-wide signing secret. Cleared from memory on drop.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Vec<u8>,
}

impl TokenSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            bytes: secret.into().into_bytes(),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Issues and verifies HS256 tokens with a fixed lifetime.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: TokenSecret,
    lifetime_seconds: i64,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret is empty or the lifetime does not fit
    /// in a signed number of seconds.
    pub fn new(secret: TokenSecret, lifetime: Duration) -> Result<Self, TokenError> {
        if secret.as_bytes().is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let lifetime_seconds =
            i64::try_from(lifetime.as_secs()).map_err(|_overflow| TokenError::InvalidLifetime)?;

        Ok(Self {
            secret,
            lifetime_seconds,
        })
    }

    /// Issue a token for `user`, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user: UserUuid) -> Result<String, TokenError> {
        self.issue_at(user, Timestamp::now())
    }

    pub(crate) fn issue_at(&self, user: UserUuid, now: Timestamp) -> Result<String, TokenError> {
        let iat = now.as_second();

        let claims = TokenClaims {
            id: user.into_uuid(),
            iat,
            exp: iat.saturating_add(self.lifetime_seconds),
        };

        encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Encode)
    }

    /// Decode `token`, checking its signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] for malformed, tampered or expired
    /// tokens.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(TOKEN_ALGORITHM);

        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|error| {
            match error.kind() {
                ErrorKind::ExpiredSignature => debug!("rejected expired token"),
                ErrorKind::InvalidSignature => debug!("rejected token with bad signature"),
                kind => debug!("rejected malformed token: {kind:?}"),
            }

            TokenError::InvalidToken
        })
    }
}
