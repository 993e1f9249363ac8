//! Recently-viewed history

use async_trait::async_trait;

use super::DEFAULT_HISTORY_CAPACITY;
use crate::domain::product::Product;
use crate::errors::ApplicationError;

/// Durable key-value slot holding one browsing profile's history.
///
/// `load` returns `None` when nothing was ever stored for the profile. Writes are
/// last-write-wins; no ordering is promised across concurrent writers.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self) -> Result<Option<Vec<Product>>, ApplicationError>;
    async fn store(&self, products: &[Product]) -> Result<(), ApplicationError>;
}

/// Most-recently-viewed first, deduplicated by product id, bounded by `capacity`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentlyViewed {
    products: Vec<Product>,
    capacity: usize,
}

impl Default for RecentlyViewed {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RecentlyViewed {
    pub fn new(capacity: usize) -> Self {
        Self { products: Vec::new(), capacity: capacity.max(1) }
    }

    /// Rebuilds a history from stored snapshots, re-applying dedup and the capacity bound.
    pub fn from_products(products: Vec<Product>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for product in products {
            if history.products.len() == history.capacity {
                break;
            }
            if !history.products.iter().any(|existing| existing.id == product.id) {
                history.products.push(product);
            }
        }
        history
    }

    /// Moves `product` to the front, dropping any older entry for the same id.
    pub fn record(&mut self, product: Product) {
        self.products.retain(|existing| existing.id != product.id);
        self.products.insert(0, product);
        self.products.truncate(self.capacity);
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
