//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::products::records::{
    Gender, ProductImageRecord, ProductImageUuid, ProductRecord, ProductUuid,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const FIND_PRODUCT_BY_TITLE_OR_SLUG_SQL: &str =
    include_str!("sql/find_product_by_title_or_slug.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const CREATE_PRODUCT_IMAGES_SQL: &str = include_str!("sql/create_product_images.sql");
const DELETE_PRODUCT_IMAGES_SQL: &str = include_str!("sql/delete_product_images.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_product_by_title_or_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        term: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FIND_PRODUCT_BY_TITLE_OR_SLUG_SQL)
            .bind(term)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
        price: i64,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.title)
            .bind(price)
            .bind(product.description.as_deref())
            .bind(&product.slug)
            .bind(i64::from(product.stock))
            .bind(&product.sizes)
            .bind(product.gender.as_str())
            .bind(&product.tags)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
        price: i64,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.title)
            .bind(price)
            .bind(product.description.as_deref())
            .bind(&product.slug)
            .bind(i64::from(product.stock))
            .bind(&product.sizes)
            .bind(product.gender.as_str())
            .bind(&product.tags)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_product_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductImageRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, ProductImageRecord>(LIST_PRODUCT_IMAGES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        urls: &[String],
    ) -> Result<u64, sqlx::Error> {
        if urls.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = urls
            .iter()
            .map(|_| ProductImageUuid::new().into_uuid())
            .collect();

        let rows_affected = query(CREATE_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .bind(uuids)
            .bind(urls)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn column_decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;
        let price = u64::try_from(price_i64).map_err(|e| column_decode_error("price", e))?;

        let stock_i64: i64 = row.try_get("stock")?;
        let stock = u32::try_from(stock_i64).map_err(|e| column_decode_error("stock", e))?;

        let gender: String = row.try_get("gender")?;
        let gender = gender
            .parse::<Gender>()
            .map_err(|e| column_decode_error("gender", e))?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            price,
            description: row.try_get("description")?,
            slug: row.try_get("slug")?,
            stock,
            sizes: row.try_get("sizes")?,
            gender,
            tags: row.try_get("tags")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductImageUuid::from_uuid(row.try_get("uuid")?),
            url: row.try_get("url")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        })
    }
}
