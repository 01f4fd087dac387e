//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_app::auth::Registration;

use crate::{
    auth::{errors::into_status_error, handlers::AuthenticatedUserResponse},
    extensions::*,
    state::State,
};

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 50;
/// bcrypt ignores everything past this many bytes.
const MAX_PASSWORD_BYTES: usize = 72;

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), StatusError> {
        if !self.email.contains('@') {
            return Err(StatusError::bad_request().brief("email must be a valid address"));
        }

        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&self.password.chars().count()) {
            return Err(StatusError::bad_request().brief("password must be 6 to 50 characters"));
        }

        if self.password.len() > MAX_PASSWORD_BYTES {
            return Err(StatusError::bad_request().brief("password must be at most 72 bytes"));
        }

        if self.full_name.trim().is_empty() {
            return Err(StatusError::bad_request().brief("full_name must not be empty"));
        }

        Ok(())
    }
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email.trim().to_lowercase(),
            password: request.password,
            full_name: request.full_name.trim().to_string(),
        }
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or email taken"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.register", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthenticatedUserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    request.validate()?;

    let user = state
        .app
        .auth
        .register(request.into())
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
