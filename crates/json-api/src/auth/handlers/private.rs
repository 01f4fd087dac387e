//! Private Handlers

use salvo::prelude::*;

use crate::{auth::handlers::UserResponse, extensions::*};

/// Resolved user, for any authenticated caller
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Resolved user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token is not valid"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    current_user(depot)
}

/// Resolved user, for admins only
#[endpoint(
    tags("auth"),
    summary = "Current Admin",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Resolved admin"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token is not valid"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
pub(crate) async fn admin_handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    current_user(depot)
}

fn current_user(depot: &Depot) -> Result<Json<UserResponse>, StatusError> {
    depot
        .current_user()
        .map(|user| Json(UserResponse::from(user)))
        .ok_or_else(StatusError::internal_server_error)
}
