//! Auth data models.

use jiff::Timestamp;
use smallvec::SmallVec;

use crate::{auth::Role, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User record as handed to callers. The password hash never leaves the
/// repository layer in this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: SmallVec<[Role; 2]>,
    pub created_at: Timestamp,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Row persisted on registration.
#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
}

/// Minimal projection used by login.
#[derive(Debug, Clone)]
pub(crate) struct StoredCredentials {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Result of a successful register or login: public profile plus a bearer
/// token. Roles and active status are deliberately left out; they are only
/// resolved when the token is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub email: String,
    pub full_name: String,
    pub token: String,
}
