//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_app::auth::Credentials;

use crate::{
    auth::{errors::into_status_error, handlers::AuthenticatedUserResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email.trim().to_lowercase(),
            password: request.password,
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Credentials are not valid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthenticatedUserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %user.uuid, "user logged in");

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use catalog_app::auth::{AuthServiceError, MockAuthService};

    use crate::{auth::handlers::tests::make_authenticated_user, test_helpers::auth_service};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| {
                credentials.email == "user@example.com" && credentials.password == "Abc123456"
            })
            .return_once(|_| Ok(make_authenticated_user("user@example.com")));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "user@example.com", "password": "Abc123456" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: AuthenticatedUserResponse = res.take_json().await?;

        assert_eq!(body.email, "user@example.com");
        assert!(!body.token.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "user@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body = res.take_string().await?;

        assert!(!body.contains("wrong"), "password must not be echoed");

        Ok(())
    }
}
