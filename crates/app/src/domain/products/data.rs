//! Products Data

use jiff::Timestamp;

use crate::domain::products::records::{Gender, ProductRecord, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: u64,
    pub description: Option<String>,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    pub stock: u32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

/// Product Update Data
///
/// `None` fields are left untouched. `images: Some(..)` replaces the whole
/// image set, including with an empty list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<u32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<Gender>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Product as exposed to callers, with images flattened to their URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub title: String,
    pub price: u64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: u32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    pub(crate) fn from_record(record: ProductRecord, images: Vec<String>) -> Self {
        Self {
            uuid: record.uuid,
            title: record.title,
            price: record.price,
            description: record.description,
            slug: record.slug,
            stock: record.stock,
            sizes: record.sizes,
            gender: record.gender,
            tags: record.tags,
            images,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl ProductRecord {
    /// Merge pending scalar changes onto a loaded record. Images are not
    /// touched here.
    pub(crate) fn merge(mut self, update: &ProductUpdate) -> Self {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }

        if let Some(price) = update.price {
            self.price = price;
        }

        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }

        if let Some(slug) = &update.slug {
            self.slug.clone_from(slug);
        }

        if let Some(stock) = update.stock {
            self.stock = stock;
        }

        if let Some(sizes) = &update.sizes {
            self.sizes.clone_from(sizes);
        }

        if let Some(gender) = update.gender {
            self.gender = gender;
        }

        if let Some(tags) = &update.tags {
            self.tags.clone_from(tags);
        }

        self.slug = normalize_slug(&self.slug);

        self
    }
}

/// Lowercase, spaces to underscores, apostrophes dropped.
#[must_use]
pub fn normalize_slug(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('\'', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            title: "Men's Chill Crew Neck".to_string(),
            price: 7_500,
            description: None,
            slug: "mens_chill_crew_neck".to_string(),
            stock: 7,
            sizes: vec!["S".to_string(), "M".to_string()],
            gender: Gender::Men,
            tags: vec!["sweatshirt".to_string()],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn normalize_slug_matches_catalog_conventions() {
        assert_eq!(normalize_slug("Men's Chill Crew Neck"), "mens_chill_crew_neck");
        assert_eq!(normalize_slug("  Already_ok "), "already_ok");
    }

    #[test]
    fn merge_only_touches_supplied_fields() {
        let original = record();

        let merged = original.clone().merge(&ProductUpdate {
            price: Some(9_900),
            tags: Some(vec![]),
            ..ProductUpdate::default()
        });

        assert_eq!(merged.price, 9_900);
        assert!(merged.tags.is_empty(), "tags should be replaced");
        assert_eq!(merged.title, original.title);
        assert_eq!(merged.sizes, original.sizes);
        assert_eq!(merged.stock, original.stock);
    }

    #[test]
    fn merge_normalizes_new_slug() {
        let merged = record().merge(&ProductUpdate {
            slug: Some("Winter Hoodie".to_string()),
            ..ProductUpdate::default()
        });

        assert_eq!(merged.slug, "winter_hoodie");
    }

    #[test]
    fn empty_update_is_identity() {
        let original = record();

        assert_eq!(original.clone().merge(&ProductUpdate::default()), original);
    }
}
