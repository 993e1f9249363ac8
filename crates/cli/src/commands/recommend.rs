use serde_json::Value;

use storefront_core::catalog::Catalog;
use storefront_core::recommendations::{Recommendation, RecommendationService};
use storefront_db::{SqlCatalogRepository, SqlHistoryStore};

use crate::commands::{
    build_cart, build_runtime, load_config, open_database, persistence_failure, product_json,
    CartEntry, CommandResult, Failure,
};

pub fn run(profile: &str, cart_entries: &[CartEntry]) -> CommandResult {
    let config = match load_config("recommend") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let engine = match config.recommendations.engine() {
        Ok(engine) => engine,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("relation table issue: {error}"),
                2,
            )
        }
    };
    let runtime = match build_runtime("recommend") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let repository = SqlCatalogRepository::new(pool.clone());
        let catalog = Catalog::fetch(&repository).await.map_err(persistence_failure)?;
        let cart = build_cart(&catalog, cart_entries)?;

        let service = RecommendationService::open(
            engine,
            SqlHistoryStore::new(pool.clone(), profile),
            config.recommendations.history_capacity,
        )
        .await;
        let ranked = service.recommend_ranked(catalog.products(), cart.items());

        pool.close().await;
        Ok::<_, Failure>(ranked)
    });

    match result {
        Ok(ranked) => {
            let items: Vec<Value> = ranked.iter().map(recommendation_json).collect();
            CommandResult::success_with_data(
                "recommend",
                format!("{} recommendation(s) for profile `{profile}`", ranked.len()),
                serde_json::json!({ "profile": profile, "recommendations": items }),
            )
        }
        Err(failure) => CommandResult::from_failure("recommend", failure),
    }
}

fn recommendation_json(recommendation: &Recommendation) -> Value {
    let mut value = product_json(&recommendation.product);
    if let Value::Object(fields) = &mut value {
        fields.insert(
            "source".to_string(),
            serde_json::to_value(recommendation.source).unwrap_or(Value::Null),
        );
        fields.insert("reason".to_string(), Value::String(recommendation.reason()));
    }
    value
}
