use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use storefront_core::domain::product::Product;
use storefront_core::errors::ApplicationError;
use storefront_core::recommendations::HistoryStore;

use super::RepositoryError;
use crate::DbPool;

/// Profile used when the caller does not name one.
pub const DEFAULT_PROFILE: &str = "default";

/// Recently-viewed list of one browsing profile, stored as a single JSON slot.
pub struct SqlHistoryStore {
    pool: DbPool,
    profile: String,
}

impl SqlHistoryStore {
    pub fn new(pool: DbPool, profile: impl Into<String>) -> Self {
        Self { pool, profile: profile.into() }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    async fn load_slot(&self) -> Result<Option<Vec<Product>>, RepositoryError> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM recently_viewed_slot WHERE profile = ?")
                .bind(&self.profile)
                .fetch_optional(&self.pool)
                .await?;

        payload
            .map(|payload| {
                serde_json::from_str::<Vec<Product>>(&payload).map_err(|e| {
                    warn!(
                        event_name = "db.history.decode_failed",
                        profile = %self.profile,
                        error = %e,
                        "stored recently viewed payload could not be decoded"
                    );
                    RepositoryError::Decode(format!(
                        "recently viewed payload for profile `{}`: {e}",
                        self.profile
                    ))
                })
            })
            .transpose()
    }

    async fn store_slot(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let payload =
            serde_json::to_string(products).map_err(|e| RepositoryError::Decode(e.to_string()))?;

        sqlx::query(
            "INSERT INTO recently_viewed_slot (profile, payload, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(profile) DO UPDATE SET
                 payload = excluded.payload,
                 updated_at = excluded.updated_at",
        )
        .bind(&self.profile)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(
            event_name = "db.history.stored",
            profile = %self.profile,
            entries = products.len(),
            "recently viewed slot written"
        );
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqlHistoryStore {
    async fn load(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
        Ok(self.load_slot().await?)
    }

    async fn store(&self, products: &[Product]) -> Result<(), ApplicationError> {
        Ok(self.store_slot(products).await?)
    }
}
