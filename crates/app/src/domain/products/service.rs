//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, Product, ProductUpdate, normalize_slug},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
    pagination::Pagination,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }

    /// Attach each record's image URLs.
    async fn with_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: Vec<ProductRecord>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let uuids: Vec<ProductUuid> = records.iter().map(|record| record.uuid).collect();

        let mut images: FxHashMap<ProductUuid, Vec<String>> = FxHashMap::default();

        for image in self.repository.list_product_images(tx, &uuids).await? {
            images.entry(image.product_uuid).or_default().push(image.url);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let urls = images.remove(&record.uuid).unwrap_or_default();

                Product::from_record(record, urls)
            })
            .collect())
    }

    async fn load_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, ProductsServiceError> {
        let record = self.repository.get_product(tx, product).await?;

        self.with_images(tx, vec![record])
            .await?
            .pop()
            .ok_or(ProductsServiceError::NotFound)
    }

    /// Persist a new product and its images.
    async fn insert_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &ProductRecord,
        price: i64,
        images: &[String],
    ) -> Result<(), ProductsServiceError> {
        self.repository.create_product(tx, record, price).await?;

        self.repository
            .create_product_images(tx, record.uuid, images)
            .await?;

        Ok(())
    }

    /// Preload, merge and write back a product. A supplied image list
    /// replaces the stored one wholesale.
    async fn replace_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<(), ProductsServiceError> {
        let merged = self.repository.get_product(tx, product).await?.merge(update);

        let price = i64::try_from(merged.price)?;

        if update.images.is_some() {
            let removed = self.repository.delete_product_images(tx, product).await?;

            debug!(%product, removed, "cleared product images");
        }

        self.repository.update_product(tx, &merged, price).await?;

        if let Some(images) = &update.images {
            self.repository
                .create_product_images(tx, product, images)
                .await?;
        }

        Ok(())
    }
}

/// Only the canonical 36 character form counts as an id; simple, braced and
/// urn spellings are looked up as titles or slugs.
fn parse_hyphenated_uuid(term: &str) -> Option<Uuid> {
    if term.len() != 36 {
        return None;
    }

    Uuid::try_parse(term).ok()
}

/// Roll back after a failed write. A rollback failure is logged and never
/// replaces the error that caused it.
async fn rollback(tx: Transaction<'static, Postgres>, product: ProductUuid) {
    if let Err(rollback_error) = tx.rollback().await {
        error!(%product, error = %rollback_error, "failed to roll back product transaction");
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .list_products(
                &mut tx,
                i64::from(pagination.limit()),
                i64::from(pagination.offset()),
            )
            .await?;

        let products = self.with_images(&mut tx, records).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn find_product(&self, term: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = match parse_hyphenated_uuid(term) {
            Some(uuid) => {
                self.repository
                    .get_product(&mut tx, ProductUuid::from_uuid(uuid))
                    .await?
            }
            None => {
                self.repository
                    .find_product_by_title_or_slug(&mut tx, term)
                    .await?
            }
        };

        let product = self
            .with_images(&mut tx, vec![record])
            .await?
            .pop()
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let NewProduct {
            title,
            price,
            description,
            slug,
            stock,
            sizes,
            gender,
            tags,
            images,
        } = product;

        let price_i64 = i64::try_from(price)?;
        let now = Timestamp::now();

        let record = ProductRecord {
            uuid: ProductUuid::new(),
            slug: normalize_slug(slug.as_deref().unwrap_or(&title)),
            title,
            price,
            description,
            stock,
            sizes,
            gender,
            tags,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.db.begin().await?;

        let inserted = self
            .insert_product(&mut tx, &record, price_i64, &images)
            .await;

        if let Err(error) = inserted {
            rollback(tx, record.uuid).await;

            return Err(error);
        }

        let created = self.load_product(&mut tx, record.uuid).await?;

        tx.commit().await?;

        info!(product = %created.uuid, slug = %created.slug, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let replaced = match self.replace_product(&mut tx, product, &update).await {
            Ok(()) => self.load_product(&mut tx, product).await,
            Err(error) => Err(error),
        };

        let updated = match replaced {
            Ok(updated) => updated,
            Err(error) => {
                rollback(tx, product).await;

                return Err(error);
            }
        };

        tx.commit().await?;

        info!(
            %product,
            replaced_images = update.images.is_some(),
            "updated product"
        );

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves a page of products.
    async fn list_products(
        &self,
        pagination: Pagination,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product by UUID, title or slug.
    async fn find_product(&self, term: &str) -> Result<Product, ProductsServiceError>;

    /// Creates a product together with its images.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Merges `update` into the product inside one transaction. On any write
    /// failure nothing is persisted. The returned product is read inside the
    /// same transaction, before commit.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product and its images.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
