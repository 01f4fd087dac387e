//! Products and their images.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use data::{NewProduct, Product, ProductUpdate};
pub use errors::ProductsServiceError;
pub use records::{Gender, ProductUuid};
pub use service::*;
