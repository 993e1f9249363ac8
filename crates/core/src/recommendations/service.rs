use tracing::{debug, warn};

use super::engine::{Recommendation, RecommendationEngine};
use super::history::{HistoryStore, RecentlyViewed};
use crate::domain::cart::CartItem;
use crate::domain::product::Product;

/// Pairs the engine with one profile's history. This is the only writer of that history.
pub struct RecommendationService<S> {
    engine: RecommendationEngine,
    store: S,
    history: RecentlyViewed,
}

impl<S: HistoryStore> RecommendationService<S> {
    /// Loads the stored history. An unreadable slot starts an empty history instead of failing.
    pub async fn open(engine: RecommendationEngine, store: S, capacity: usize) -> Self {
        let history = match store.load().await {
            Ok(Some(products)) => RecentlyViewed::from_products(products, capacity),
            Ok(None) => RecentlyViewed::new(capacity),
            Err(error) => {
                warn!(
                    event_name = "recommendations.history.load_failed",
                    error = %error,
                    "recently viewed history could not be loaded, starting empty"
                );
                RecentlyViewed::new(capacity)
            }
        };

        Self { engine, store, history }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn recently_viewed(&self) -> &[Product] {
        self.history.products()
    }

    /// Records a view and writes the history through. Store failures are logged, never returned.
    pub async fn record_view(&mut self, product: Product) {
        debug!(
            event_name = "recommendations.history.viewed",
            product_id = %product.id,
            "recording product view"
        );
        self.history.record(product);

        if let Err(error) = self.store.store(self.history.products()).await {
            warn!(
                event_name = "recommendations.history.store_failed",
                error = %error,
                entries = self.history.len(),
                "recently viewed history could not be persisted"
            );
        }
    }

    pub fn recommend(&self, catalog: &[Product], cart: &[CartItem]) -> Vec<Product> {
        self.engine.recommend(catalog, cart, self.history.products())
    }

    pub fn recommend_ranked(&self, catalog: &[Product], cart: &[CartItem]) -> Vec<Recommendation> {
        self.engine.recommend_ranked(catalog, cart, self.history.products())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use super::RecommendationService;
    use crate::domain::product::Product;
    use crate::errors::ApplicationError;
    use crate::recommendations::{HistoryStore, RecommendationEngine};

    #[derive(Default)]
    struct RecordingStore {
        stored: Mutex<Option<Vec<Product>>>,
        writes: Mutex<usize>,
    }

    #[async_trait]
    impl HistoryStore for RecordingStore {
        async fn load(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
            Ok(self.stored.lock().expect("store lock").clone())
        }

        async fn store(&self, products: &[Product]) -> Result<(), ApplicationError> {
            *self.stored.lock().expect("store lock") = Some(products.to_vec());
            *self.writes.lock().expect("write counter lock") += 1;
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl HistoryStore for BrokenStore {
        async fn load(&self) -> Result<Option<Vec<Product>>, ApplicationError> {
            Err(ApplicationError::Persistence("slot unreadable".to_owned()))
        }

        async fn store(&self, _products: &[Product]) -> Result<(), ApplicationError> {
            Err(ApplicationError::Persistence("slot read-only".to_owned()))
        }
    }

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, Decimal::new(25, 0)).expect("valid product")
    }

    #[tokio::test]
    async fn record_view_writes_history_through_store() {
        let engine = RecommendationEngine::default();
        let mut service = RecommendationService::open(engine, RecordingStore::default(), 10).await;

        service.record_view(product("cake", "Cake")).await;
        service.record_view(product("bread", "Bread")).await;
        service.record_view(product("cake", "Cake")).await;

        let stored = service.store.stored.lock().expect("store lock").clone().expect("stored");
        let ids: Vec<_> = stored.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["cake", "bread"]);
        assert_eq!(*service.store.writes.lock().expect("write counter lock"), 3);
    }

    #[tokio::test]
    async fn open_restores_previous_history() {
        let store = RecordingStore::default();
        *store.stored.lock().expect("store lock") =
            Some(vec![product("cake", "Cake"), product("bread", "Bread")]);

        let service = RecommendationService::open(RecommendationEngine::default(), store, 10).await;

        assert_eq!(service.recently_viewed().len(), 2);
        assert_eq!(service.recently_viewed()[0].id.as_str(), "cake");
    }

    #[tokio::test]
    async fn broken_store_never_fails_callers() {
        let mut service =
            RecommendationService::open(RecommendationEngine::default(), BrokenStore, 10).await;
        assert!(service.recently_viewed().is_empty());

        service.record_view(product("cake", "Cake")).await;

        assert_eq!(service.recently_viewed().len(), 1);
    }

    #[tokio::test]
    async fn recommendations_use_recorded_history() {
        let catalog = vec![
            product("tea", "Green Tea"),
            product("cake", "Cake"),
            product("candle", "Candle"),
        ];
        let engine = RecommendationEngine::default();
        let mut service = RecommendationService::open(engine, RecordingStore::default(), 10).await;

        service.record_view(catalog[1].clone()).await;
        let result = service.recommend(&catalog, &[]);

        let ids: Vec<_> = result.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["candle", "tea", "cake"]);
    }
}
