//! Auth Config

use std::time::Duration;

use catalog_app::auth::{TokenError, TokenSecret, TokenService};
use clap::Args;

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign and verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued tokens in seconds
    #[arg(long, env = "JWT_EXPIRES_IN_SECONDS", default_value_t = 7_200)]
    pub jwt_expires_in_seconds: u64,
}

impl AuthConfig {
    /// Build the process-wide token service.
    ///
    /// # Errors
    ///
    /// Returns an error when the secret is empty or the lifetime is out of
    /// range.
    pub fn token_service(&self) -> Result<TokenService, TokenError> {
        TokenService::new(
            TokenSecret::new(self.jwt_secret.clone()),
            Duration::from_secs(self.jwt_expires_in_seconds),
        )
    }
}
