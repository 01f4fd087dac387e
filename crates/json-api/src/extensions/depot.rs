//! Depot helper extensions.

use std::any::Any;

use catalog_app::auth::User;
use salvo::prelude::{Depot, StatusError};

/// The user resolved from the request's bearer token.
#[derive(Debug, Clone)]
struct CurrentUser(User);

/// Helpers for typed depot access.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Attach the authenticated user for downstream guards and handlers.
    fn insert_current_user(&mut self, user: User);

    /// The authenticated user, if identity resolution ran for this request.
    fn current_user(&self) -> Option<&User>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: User) {
        self.inject(CurrentUser(user));
    }

    fn current_user(&self) -> Option<&User> {
        self.obtain::<CurrentUser>()
            .ok()
            .map(|CurrentUser(user)| user)
    }
}
