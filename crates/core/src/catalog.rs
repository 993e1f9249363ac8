use async_trait::async_trait;

use crate::domain::product::{Product, ProductId};
use crate::errors::ApplicationError;

/// Source of the current product set. Every call returns a fresh snapshot.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApplicationError>;
}

/// Point-in-time view of the catalog, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub async fn fetch(source: &dyn CatalogSource) -> Result<Self, ApplicationError> {
        source.fetch_catalog().await.map(Self::new)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }
}
