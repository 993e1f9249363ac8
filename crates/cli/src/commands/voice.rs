use storefront_core::catalog::Catalog;
use storefront_core::voice::{ScriptedRecognizer, SpeechError, VoiceCommandSession};
use storefront_db::SqlCatalogRepository;

use crate::commands::{
    build_cart, build_runtime, cart_json, load_config, open_database, persistence_failure,
    CartEntry, CommandResult, Failure,
};

/// Runs one voice command against the stored catalog. `speech_error` simulates a recognizer
/// failure code (e.g. `not-allowed`) instead of hearing `transcript`.
pub fn run(
    transcript: &str,
    speech_error: Option<&str>,
    cart_entries: &[CartEntry],
) -> CommandResult {
    let config = match load_config("voice") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime("voice") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let recognizer = match speech_error {
        Some(code) => ScriptedRecognizer::failing(SpeechError::from_code(code)),
        None => ScriptedRecognizer::transcript(transcript),
    };
    let session = VoiceCommandSession::new(recognizer, config.voice.language.clone());

    let result = runtime.block_on(async {
        let pool = open_database(&config).await?;
        let repository = SqlCatalogRepository::new(pool.clone());
        let catalog = Catalog::fetch(&repository).await.map_err(persistence_failure)?;
        pool.close().await;

        let mut cart = build_cart(&catalog, cart_entries)?;
        let outcome = session.run(catalog.products(), &mut cart).await;
        Ok::<_, Failure>((outcome, cart))
    });

    match result {
        Ok((outcome, cart)) => {
            let notifications = outcome.notifications();
            let message = notifications
                .iter()
                .map(|notification| notification.message.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            CommandResult::success_with_data(
                "voice",
                message,
                serde_json::json!({
                    "outcome": outcome.label(),
                    "result": outcome,
                    "notifications": notifications,
                    "cart": cart_json(&cart),
                }),
            )
        }
        Err(failure) => CommandResult::from_failure("voice", failure),
    }
}
