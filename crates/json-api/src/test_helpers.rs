//! Test helpers.

use std::sync::Arc;

use catalog_app::{
    auth::MockAuthService, context::AppContext, domain::products::MockProductsService,
};
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_find_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn state_with(products: MockProductsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state_with(products, strict_auth_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_products_mock(), auth)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(route))
}
