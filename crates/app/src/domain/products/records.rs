//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Image UUID
pub type ProductImageUuid = TypedUuid<ProductImageRecord>;

/// Target audience of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Kid,
    Unisex,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kid => "kid",
            Self::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown gender: {0}")]
pub struct UnknownGenderError(pub String);

impl FromStr for Gender {
    type Err = UnknownGenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "kid" => Ok(Self::Kid),
            "unisex" => Ok(Self::Unisex),
            _ => Err(UnknownGenderError(value.to_string())),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub price: u64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: u32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Image Record, owned by exactly one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImageRecord {
    pub uuid: ProductImageUuid,
    pub url: String,
    pub product_uuid: ProductUuid,
}
