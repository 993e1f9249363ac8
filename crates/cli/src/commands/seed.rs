use storefront_db::{BakeryCatalogFixture, SqlCatalogRepository};

use crate::commands::{
    build_runtime, load_config, open_database, persistence_failure, CommandResult, Failure,
};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let repository = SqlCatalogRepository::new(pool.clone());

        let seeded = BakeryCatalogFixture::load(&repository).await.map_err(persistence_failure)?;
        let verified =
            BakeryCatalogFixture::verify(&repository).await.map_err(persistence_failure)?;

        pool.close().await;
        if verified {
            Ok(seeded.product_ids)
        } else {
            Err(seed_verification_failure())
        }
    });

    match result {
        Ok(product_ids) => CommandResult::success_with_data(
            "seed",
            seed_message(product_ids.len()),
            serde_json::json!({ "product_ids": product_ids }),
        ),
        Err(failure) => CommandResult::from_failure("seed", failure),
    }
}

fn seed_message(count: usize) -> String {
    format!("demo bakery catalog loaded ({count} products)")
}

fn seed_verification_failure() -> Failure {
    ("seed_verification", "demo catalog products are missing after seeding".to_string(), 6)
}
