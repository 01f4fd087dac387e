//! Role-based access control.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::User;

/// Role names a user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    SuperUser,
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperUser => "super-user",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "super-user" => Ok(Self::SuperUser),
            "user" => Ok(Self::User),
            _ => Err(UnknownRoleError(value.to_string())),
        }
    }
}

/// Roles a route requires, attached when the route is registered.
///
/// An empty set means any authenticated user is let through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredRoles(FxHashSet<Role>);

impl RequiredRoles {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether any of `roles` satisfies this requirement.
    #[must_use]
    pub fn admits(&self, roles: &[Role]) -> bool {
        self.is_empty() || roles.iter().any(|role| self.contains(*role))
    }
}

impl<I> From<I> for RequiredRoles
where
    I: IntoIterator<Item = Role>,
{
    fn from(roles: I) -> Self {
        Self(roles.into_iter().collect())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("user lacks the roles required for this route")]
    Forbidden,

    /// The role check ran before identity resolution attached a user.
    #[error("role check ran without a resolved user")]
    ServerMisconfiguration,
}

/// Second guard stage: check the resolved user against the route's roles.
///
/// # Errors
///
/// Returns [`AccessError::ServerMisconfiguration`] when no user was resolved
/// and [`AccessError::Forbidden`] when the user holds none of the roles.
pub fn authorize(user: Option<&User>, required: &RequiredRoles) -> Result<(), AccessError> {
    let user = user.ok_or(AccessError::ServerMisconfiguration)?;

    if required.admits(&user.roles) {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}
