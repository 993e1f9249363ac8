pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommendations;
pub mod voice;

pub use catalog::{Catalog, CatalogSource};
pub use domain::cart::{Cart, CartItem};
pub use domain::product::{format_price, Product, ProductId};
pub use errors::{ApplicationError, DomainError};
pub use recommendations::{
    HistoryStore, RecentlyViewed, Recommendation, RecommendationEngine, RecommendationService,
    RecommendationSource, RelationTable,
};
pub use voice::{
    CartSink, SpeechError, SpeechRecognizer, VoiceCommandSession, VoiceNotification, VoiceOutcome,
};
