//! Rule-based product recommendations
//!
//! Derives a short list of suggested products from the cart, the recently-viewed history and a
//! keyword relation table. Ranking is tiered: cart-driven matches first, then history-driven
//! matches, then the remaining catalog in catalog order.

mod engine;
mod history;
mod relations;
mod service;

pub use engine::{Recommendation, RecommendationEngine, RecommendationSource};
pub use history::{HistoryStore, RecentlyViewed};
pub use relations::{KeywordRelation, RelationTable};
pub use service::RecommendationService;

/// Maximum products returned by a recommendation pass
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 4;

/// Maximum entries kept in the recently-viewed history
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
