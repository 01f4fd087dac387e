//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::auth::{
    AuthServiceError, AuthenticatedUser, Credentials, Registration, Role, TokenService, User,
    UserUuid, hash_password, models::NewUser, repository::PgUsersRepository,
    verify_against_dummy_hash, verify_password,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgUsersRepository,
    tokens: TokenService,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, tokens: TokenService) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            tokens,
        }
    }

    fn authenticated(
        &self,
        uuid: UserUuid,
        email: String,
        full_name: String,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let token = self.tokens.issue(uuid)?;

        Ok(AuthenticatedUser {
            uuid,
            email,
            full_name,
            token,
        })
    }
}

/// Account administration. Never issues tokens.
#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }

    /// Add `role` to the user registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UserNotFound`] for unknown emails, or a
    /// storage error.
    pub async fn grant_role(&self, email: &str, role: Role) -> Result<User, AuthServiceError> {
        self.repository
            .grant_role(email, role)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }

    /// Remove `role` from the user registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UserNotFound`] for unknown emails, or a
    /// storage error.
    pub async fn revoke_role(&self, email: &str, role: Role) -> Result<User, AuthServiceError> {
        self.repository
            .revoke_role(email, role)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }

    /// Activate or deactivate the user registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UserNotFound`] for unknown emails, or a
    /// storage error.
    pub async fn set_active(&self, email: &str, is_active: bool) -> Result<User, AuthServiceError> {
        self.repository
            .set_active(email, is_active)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let Registration {
            email,
            password,
            full_name,
        } = registration;

        let password_hash = hash_password(&password)?;

        let user = self
            .repository
            .create_user(&NewUser {
                uuid: UserUuid::new(),
                email,
                password_hash,
                full_name,
            })
            .await?;

        info!(user_uuid = %user.uuid, "registered user");

        self.authenticated(user.uuid, user.email, user.full_name)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthServiceError> {
        let Some(stored) = self
            .repository
            .find_credentials_by_email(&credentials.email)
            .await?
        else {
            verify_against_dummy_hash(&credentials.password);

            debug!("login rejected: unknown email");

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &stored.password_hash)? {
            debug!(user_uuid = %stored.uuid, "login rejected: password mismatch");

            return Err(AuthServiceError::InvalidCredentials);
        }

        self.authenticated(stored.uuid, stored.email, stored.full_name)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError> {
        let claims = self.tokens.verify(bearer_token)?;

        let user = self
            .repository
            .find_user(claims.user_uuid())
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        if !user.is_active {
            debug!(user_uuid = %user.uuid, "rejected token for inactive user");

            return Err(AuthServiceError::Unauthenticated);
        }

        Ok(user)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash the password, persist a new user and issue a token for it.
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Resolve a bearer token to an active user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError>;
}
