//! Role guard

use catalog_app::auth::{RequiredRoles, Role, authorize};
use salvo::prelude::*;

use crate::{auth::errors::access_status_error, extensions::*};

/// Route-level role check. Must be mounted after [`authenticate`].
///
/// [`authenticate`]: crate::auth::middleware::authenticate
#[derive(Debug, Clone)]
pub(crate) struct RoleGuard {
    required: RequiredRoles,
}

impl RoleGuard {
    #[must_use]
    pub(crate) fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            required: RequiredRoles::from(roles),
        }
    }
}

#[handler]
impl RoleGuard {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if let Err(error) = authorize(depot.current_user(), &self.required) {
            res.render(access_status_error(&error));
            ctrl.skip_rest();

            return;
        }

        ctrl.call_next(req, depot, res).await;
    }
}

#[cfg(test)]
mod tests {
    use catalog_app::auth::{User, UserUuid};
    use jiff::Timestamp;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use super::*;

    struct WithUser(User);

    #[handler]
    impl WithUser {
        async fn handle(
            &self,
            req: &mut Request,
            depot: &mut Depot,
            res: &mut Response,
            ctrl: &mut FlowCtrl,
        ) {
            depot.insert_current_user(self.0.clone());
            ctrl.call_next(req, depot, res).await;
        }
    }

    #[handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn user_with_roles(roles: &[Role]) -> User {
        User {
            uuid: UserUuid::new(),
            email: "someone@example.com".to_string(),
            full_name: "Someone".to_string(),
            is_active: true,
            roles: roles.iter().copied().collect(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn service(user: Option<User>, guard: RoleGuard) -> Service {
        let mut router = Router::new();

        if let Some(user) = user {
            router = router.hoop(WithUser(user));
        }

        Service::new(router.hoop(guard).get(ok))
    }

    #[tokio::test]
    async fn test_admin_passes_admin_guard() -> TestResult {
        let service = service(
            Some(user_with_roles(&[Role::User, Role::Admin])),
            RoleGuard::new([Role::Admin]),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_plain_user_is_forbidden() -> TestResult {
        let service = service(
            Some(user_with_roles(&[Role::User])),
            RoleGuard::new([Role::Admin, Role::SuperUser]),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_user_without_roles_is_forbidden() -> TestResult {
        let service = service(Some(user_with_roles(&[])), RoleGuard::new([Role::Admin]));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_requirement_admits_any_user() -> TestResult {
        let service = service(
            Some(user_with_roles(&[])),
            RoleGuard::new(Vec::<Role>::new()),
        );

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_user_is_a_server_error() -> TestResult {
        let service = service(None, RoleGuard::new([Role::Admin]));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
