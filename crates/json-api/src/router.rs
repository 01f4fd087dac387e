//! App Router

use catalog_app::auth::Role;
use salvo::Router;

use crate::{
    auth::{self, RoleGuard, middleware::authenticate},
    products,
};

pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(
                    Router::with_path("private")
                        .hoop(authenticate)
                        .get(auth::private::handler)
                        .push(
                            Router::with_path("admin")
                                .hoop(RoleGuard::new([Role::Admin]))
                                .get(auth::private::admin_handler),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{term}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(authenticate)
                        .hoop(RoleGuard::new([Role::Admin]))
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .patch(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
}
