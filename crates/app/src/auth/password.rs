//! Password hashing.

use bcrypt::BcryptError;
use once_cell::sync::Lazy;
use thiserror::Error;

/// bcrypt cost factor used for every stored password.
pub const PASSWORD_HASH_COST: u32 = 10;

/// Stand-in hash at the same cost, checked when no stored hash exists so the
/// lookup miss costs as much as a real verification.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("catalog-unknown-account").ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[source] BcryptError),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] BcryptError),
}

/// Hash a plaintext password with a fresh salt.
///
/// # Errors
///
/// Returns an error if bcrypt fails to produce a hash.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, PASSWORD_HASH_COST).map_err(PasswordError::Hash)
}

/// Check a plaintext password against a stored hash.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plaintext, hash).map_err(PasswordError::MalformedHash)
}

/// Spend one verification against a fixed hash and discard the outcome.
pub fn verify_against_dummy_hash(plaintext: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _outcome = bcrypt::verify(plaintext, hash).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_against_original_password() -> TestResult {
        let hash = hash_password("Abc123456")?;

        assert!(verify_password("Abc123456", &hash)?, "password should match");
        assert!(!verify_password("abc123456", &hash)?, "case must matter");

        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> TestResult {
        let first = hash_password("Abc123456")?;
        let second = hash_password("Abc123456")?;

        assert_ne!(first, second, "each hash should carry its own salt");
        assert!(!first.contains("Abc123456"), "plaintext must not leak");

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("Abc123456", "not-a-hash"),
            Err(PasswordError::MalformedHash(_))
        ));
    }

    #[test]
    fn dummy_verification_costs_a_real_verification() -> TestResult {
        verify_against_dummy_hash("warm-up");

        let hash = hash_password("Abc123456")?;

        let started = Instant::now();
        let matched = verify_password("wrong-password", &hash)?;
        let real = started.elapsed();

        let started = Instant::now();
        verify_against_dummy_hash("wrong-password");
        let dummy = started.elapsed();

        assert!(!matched, "wrong password must not match");
        assert!(
            dummy >= real / 2,
            "dummy verification took {dummy:?}, real one took {real:?}"
        );

        Ok(())
    }
}
