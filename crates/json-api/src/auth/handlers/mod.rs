//! Auth Handlers

pub(crate) mod login;
pub(crate) mod private;
pub(crate) mod register;

use catalog_app::auth::{AuthenticatedUser, User};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile returned by register and login, carrying a fresh bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthenticatedUserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub full_name: String,
    pub token: String,
}

impl From<AuthenticatedUser> for AuthenticatedUserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            uuid: user.uuid.into(),
            email: user.email,
            full_name: user.full_name,
            token: user.token,
        }
    }
}

/// Resolved user as seen by the access guard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid.into(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            roles: user
                .roles
                .iter()
                .map(|role| role.as_str().to_string())
                .collect(),
        }
    }
}
