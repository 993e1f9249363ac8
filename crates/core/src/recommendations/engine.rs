//! Recommendation engine implementation

use std::collections::HashSet;

use serde::Serialize;

use super::relations::RelationTable;
use super::DEFAULT_MAX_RECOMMENDATIONS;
use crate::domain::cart::CartItem;
use crate::domain::product::{Product, ProductId};

/// Tier that first contributed a recommended product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Related to a product already in the cart
    Cart,
    /// Related to a recently viewed product
    History,
    /// Remaining catalog, in catalog order
    Fallback,
}

impl RecommendationSource {
    pub fn description(&self) -> &'static str {
        match self {
            RecommendationSource::Cart => "Goes well with your cart",
            RecommendationSource::History => "Based on what you viewed",
            RecommendationSource::Fallback => "You may also like",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub product: Product,
    pub source: RecommendationSource,
    /// Name of the cart or history product whose relation pulled this one in
    pub triggered_by: Option<String>,
}

impl Recommendation {
    pub fn reason(&self) -> String {
        match (&self.source, &self.triggered_by) {
            (RecommendationSource::Cart, Some(trigger)) => {
                format!("Pairs with {trigger} in your cart")
            }
            (RecommendationSource::History, Some(trigger)) => {
                format!("Because you viewed {trigger}")
            }
            (source, _) => source.description().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    product: &'a Product,
    source: RecommendationSource,
    trigger: Option<&'a Product>,
}

/// Deterministic, side-effect free recommendation pass over a catalog snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    relations: RelationTable,
    max_results: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(RelationTable::default())
    }
}

impl RecommendationEngine {
    pub fn new(relations: RelationTable) -> Self {
        Self { relations, max_results: DEFAULT_MAX_RECOMMENDATIONS }
    }

    /// The limit is clamped to `1..=DEFAULT_MAX_RECOMMENDATIONS`.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(1, DEFAULT_MAX_RECOMMENDATIONS);
        self
    }

    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn recommend(
        &self,
        catalog: &[Product],
        cart: &[CartItem],
        recently_viewed: &[Product],
    ) -> Vec<Product> {
        self.recommend_ranked(catalog, cart, recently_viewed)
            .into_iter()
            .map(|recommendation| recommendation.product)
            .collect()
    }

    /// Cart-driven hits rank above history-driven hits, which rank above the fallback tier.
    /// Later tiers only run while fewer than `max_results` candidates have accumulated.
    pub fn recommend_ranked(
        &self,
        catalog: &[Product],
        cart: &[CartItem],
        recently_viewed: &[Product],
    ) -> Vec<Recommendation> {
        if catalog.is_empty() {
            return Vec::new();
        }

        let in_cart: HashSet<&ProductId> = cart.iter().map(|item| &item.product.id).collect();
        let normalized: Vec<(&Product, String)> =
            catalog.iter().map(|product| (product, product.normalized_name())).collect();
        let mut candidates = Vec::new();

        for item in cart {
            self.collect_related(
                &item.product,
                RecommendationSource::Cart,
                &normalized,
                &in_cart,
                &mut candidates,
            );
        }

        if candidates.len() < self.max_results {
            for viewed in recently_viewed {
                self.collect_related(
                    viewed,
                    RecommendationSource::History,
                    &normalized,
                    &in_cart,
                    &mut candidates,
                );
            }
        }

        if candidates.len() < self.max_results {
            candidates.extend(catalog.iter().filter(|product| !in_cart.contains(&product.id)).map(
                |product| Candidate {
                    product,
                    source: RecommendationSource::Fallback,
                    trigger: None,
                },
            ));
        }

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.product.id.clone()))
            .take(self.max_results)
            .map(|candidate| Recommendation {
                product: candidate.product.clone(),
                source: candidate.source,
                triggered_by: candidate.trigger.map(|trigger| trigger.name.clone()),
            })
            .collect()
    }

    fn collect_related<'a>(
        &self,
        trigger: &'a Product,
        source: RecommendationSource,
        catalog: &[(&'a Product, String)],
        in_cart: &HashSet<&ProductId>,
        out: &mut Vec<Candidate<'a>>,
    ) {
        let trigger_name = trigger.normalized_name();
        for related in self.relations.related_keywords(&trigger_name) {
            out.extend(
                catalog
                    .iter()
                    .filter(|(product, name)| {
                        name.contains(related)
                            && !in_cart.contains(&product.id)
                            && product.id != trigger.id
                    })
                    .map(|(product, _)| Candidate {
                        product: *product,
                        source,
                        trigger: Some(trigger),
                    }),
            );
        }
    }
}
