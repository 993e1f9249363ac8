use serde_json::Value;

use storefront_core::domain::product::ProductId;
use storefront_core::recommendations::{RecommendationEngine, RecommendationService};
use storefront_db::{CatalogRepository, SqlCatalogRepository, SqlHistoryStore};

use crate::commands::{
    build_runtime, load_config, open_database, persistence_failure, product_json, CommandResult,
    Failure,
};

/// Records a product view for `profile` and reports the resulting history.
pub fn run(product_id: &str, profile: &str) -> CommandResult {
    let config = match load_config("view") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime("view") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let repository = SqlCatalogRepository::new(pool.clone());
        let product = repository
            .find_by_id(&ProductId::from(product_id))
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| {
                ("not_found", format!("product `{product_id}` is not in the catalog"), 7u8)
            })?;

        let mut service = RecommendationService::open(
            RecommendationEngine::default(),
            SqlHistoryStore::new(pool.clone(), profile),
            config.recommendations.history_capacity,
        )
        .await;
        service.record_view(product).await;
        let history = service.recently_viewed().to_vec();

        pool.close().await;
        Ok::<_, Failure>(history)
    });

    match result {
        Ok(history) => {
            let items: Vec<Value> = history.iter().map(product_json).collect();
            CommandResult::success_with_data(
                "view",
                format!("recorded view of `{product_id}` ({} recently viewed)", history.len()),
                serde_json::json!({ "profile": profile, "recently_viewed": items }),
            )
        }
        Err(failure) => CommandResult::from_failure("view", failure),
    }
}
