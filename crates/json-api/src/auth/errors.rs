//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use catalog_app::auth::{AccessError, AuthServiceError};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Credentials are not valid")
        }
        AuthServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Token is not valid")
        }
        AuthServiceError::DuplicateCredential => {
            StatusError::bad_request().brief("Email is already registered")
        }
        AuthServiceError::UserNotFound => StatusError::not_found(),
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("token signing failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn access_status_error(error: &AccessError) -> StatusError {
    match error {
        AccessError::Forbidden => {
            StatusError::forbidden().brief("User lacks a role required for this route")
        }
        AccessError::ServerMisconfiguration => {
            error!("role guard ran before identity resolution");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_app::auth::TokenError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn credential_errors_map_to_client_statuses() {
        assert_eq!(
            into_status_error(AuthServiceError::InvalidCredentials).code,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            into_status_error(AuthServiceError::Unauthenticated).code,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            into_status_error(AuthServiceError::DuplicateCredential).code,
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn signing_failures_are_internal() {
        let status = into_status_error(AuthServiceError::Token(TokenError::EmptySecret));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn access_errors_map_to_forbidden_and_500() {
        assert_eq!(
            access_status_error(&AccessError::Forbidden).code,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            access_status_error(&AccessError::ServerMisconfiguration).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
