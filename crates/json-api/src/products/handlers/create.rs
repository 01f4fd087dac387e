//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_app::domain::products::{Gender, NewProduct};

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub title: String,
    /// Price in pence/cents
    pub price: u64,
    #[serde(default)]
    pub description: Option<String>,
    /// Derived from the title when omitted
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub stock: u32,
    pub sizes: Vec<String>,
    /// One of `men`, `women`, `kid` or `unisex`
    pub gender: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        if self.title.trim().is_empty() {
            return Err(StatusError::bad_request().brief("title must not be empty"));
        }

        let gender = self
            .gender
            .parse::<Gender>()
            .or_400("gender must be one of men, women, kid or unisex")?;

        Ok(NewProduct {
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

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or duplicate product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token is not valid"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty, images_count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_product = json.into_inner().into_new_product()?;

    let span = tracing::Span::current();

    span.record("images_count", new_product.images.len());

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    span.record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(product_uuid = %product.uuid, slug = %product.slug, "created product");

    Ok(Json(product.into()))
}
