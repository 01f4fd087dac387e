//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_app::domain::products::Product;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub title: String,

    /// The price of the product in pence/cents
    pub price: u64,

    pub description: Option<String>,

    pub slug: String,

    pub stock: u32,

    pub sizes: Vec<String>,

    /// One of `men`, `women`, `kid` or `unisex`
    pub gender: String,

    pub tags: Vec<String>,

    /// Image URLs
    pub images: Vec<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            title: product.title,
            price: product.price,
            description: product.description,
            slug: product.slug,
            stock: product.stock,
            sizes: product.sizes,
            gender: product.gender.to_string(),
            tags: product.tags,
            images: product.images,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
