use async_trait::async_trait;
use thiserror::Error;

use storefront_core::domain::product::{Product, ProductId};
use storefront_core::errors::ApplicationError;

pub mod catalog;
pub mod history;
pub mod memory;

pub use catalog::SqlCatalogRepository;
pub use history::{SqlHistoryStore, DEFAULT_PROFILE};
pub use memory::{InMemoryCatalog, InMemoryHistoryStore};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

/// Product catalog storage. `list` returns products in catalog order.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
    /// Inserts or replaces a product. New products go to the end of the catalog order.
    async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
    /// Returns whether a product was removed.
    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError>;
}
