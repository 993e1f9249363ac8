use std::str::FromStr;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::Row;

use storefront_core::catalog::CatalogSource;
use storefront_core::domain::product::{Product, ProductId};
use storefront_core::errors::ApplicationError;

use super::{CatalogRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCatalogRepository {
    pool: DbPool,
}

impl SqlCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_text: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let photo: Option<String> =
        row.try_get("photo").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = Decimal::from_str(price_text.trim()).map_err(|e| {
        RepositoryError::Decode(format!("invalid price `{price_text}` for product `{id}`: {e}"))
    })?;
    let product =
        Product::new(id, name, price).map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(match photo {
        Some(photo) => product.with_photo(photo),
        None => product,
    })
}

#[async_trait]
impl CatalogRepository for SqlCatalogRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, name, price, photo FROM product ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, price, photo FROM product WHERE id = ?")
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO product (id, name, price, photo, sort_order)
             VALUES (?, ?, ?, ?, (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM product))
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 price = excluded.price,
                 photo = excluded.photo",
        )
        .bind(&product.id.0)
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(&product.photo)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM product WHERE id = ?").bind(&id.0).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CatalogSource for SqlCatalogRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.list().await?)
    }
}
