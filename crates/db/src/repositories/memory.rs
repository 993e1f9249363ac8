use tokio::sync::RwLock;

use storefront_core::catalog::CatalogSource;
use storefront_core::domain::product::{Product, ProductId};
use storefront_core::errors::ApplicationError;
use storefront_core::recommendations::HistoryStore;

use super::{CatalogRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|existing| existing.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| &product.id != id);
        Ok(products.len() != before)
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.list().await?)
    }
}

/// Single-slot history store; `None` until the first write.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    slot: RwLock<Option<Vec<Product>>>,
}

impl InMemoryHistoryStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { slot: RwLock::new(Some(products)) }
    }

    pub async fn snapshot(&self) -> Option<Vec<Product>> {
        self.slot.read().await.clone()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
        Ok(self.slot.read().await.clone())
    }

    async fn store(&self, products: &[Product]) -> Result<(), ApplicationError> {
        *self.slot.write().await = Some(products.to_vec());
        Ok(())
    }
}
