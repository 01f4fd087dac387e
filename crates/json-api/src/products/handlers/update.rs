//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use catalog_app::domain::products::{Gender, ProductUpdate};

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Update Product Request
///
/// Omitted fields are left as they are. `images` replaces the whole image
/// set when present.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<u32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<String>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        let gender = self
            .gender
            .map(|gender| gender.parse::<Gender>())
            .transpose()
            .or_400("gender must be one of men, women, kid or unisex")?;

        Ok(ProductUpdate {
            title: self.title,
            price: self.price,
            description: self.description,
            slug: self.slug,
            stock: self.stock,
            sizes: self.sizes,
            gender,
            tags: self.tags,
            images: self.images,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or duplicate value"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token is not valid"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        product_uuid = tracing::field::Empty,
        replaces_images = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();
    let update = json.into_inner().into_update()?;

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("replaces_images", update.images.is_some());

    let product = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    info!(product_uuid = %product.uuid, "updated product");

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use catalog_app::domain::products::{MockProductsService, ProductUuid, ProductsServiceError};

    use crate::{products::handlers::tests::make_product, test_helpers::products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{product}").patch(handler))
    }

    #[tokio::test]
    async fn test_update_product_replaces_images() -> TestResult {
        let uuid = ProductUuid::new();

        let mut product = make_product(uuid);

        product.price = 9_900;
        product.images = vec!["c.jpg".to_string()];

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == ProductUpdate {
                            price: Some(9_900),
                            images: Some(vec!["c.jpg".to_string()]),
                            ..ProductUpdate::default()
                        }
            })
            .return_once(move |_, _| Ok(product));

        let mut res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "price": 9_900, "images": ["c.jpg"] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.price, 9_900);
        assert_eq!(body.images, vec!["c.jpg"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_without_images_leaves_them_alone() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(|_, update| update.images.is_none() && update.gender == Some(Gender::Unisex))
            .return_once(move |_, _| Ok(make_product(uuid)));

        let res = TestClient::patch(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "gender": "unisex" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_invalid_uuid_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product().never();

        let res = TestClient::patch("http://example.com/products/123")
            .json(&json!({ "price": 200 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_not_found_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "price": 200 }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_duplicate_image_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::DuplicateConstraint));

        let res = TestClient::patch(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "images": ["taken.jpg"] }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
