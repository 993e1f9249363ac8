use tracing::{info, warn};

use super::outcome::VoiceOutcome;
use super::resolver::interpret;
use super::speech::SpeechRecognizer;
use crate::domain::cart::Cart;
use crate::domain::product::Product;
use crate::errors::DomainError;

/// Receiver of resolved voice items. Quantities merge into an existing line for the same product.
pub trait CartSink {
    fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<(), DomainError>;
}

impl CartSink for Cart {
    fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<(), DomainError> {
        self.add(product.clone(), quantity)
    }
}

/// One listen, interpret, apply cycle per `run`.
pub struct VoiceCommandSession<R> {
    recognizer: R,
    language: String,
}

impl<R: SpeechRecognizer> VoiceCommandSession<R> {
    pub fn new(recognizer: R, language: impl Into<String>) -> Self {
        Self { recognizer, language: language.into() }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn run<C>(&self, catalog: &[Product], cart: &mut C) -> VoiceOutcome
    where
        C: CartSink + ?Sized,
    {
        info!(
            event_name = "voice.listening.started",
            language = %self.language,
            "listening for a voice command"
        );
        let heard = self.recognizer.listen(&self.language).await;
        info!(event_name = "voice.listening.ended", success = heard.is_ok(), "listening ended");

        match heard {
            Ok(transcript) => apply_transcript(&transcript, catalog, cart),
            Err(error) => {
                warn!(
                    event_name = "voice.listening.failed",
                    error = %error,
                    capability_missing = error.is_capability_missing(),
                    "speech input unavailable"
                );
                VoiceOutcome::Unavailable { error }
            }
        }
    }
}

/// Interprets `transcript` once and adds every resolved item to `cart`. Items the cart rejects
/// are reported as unmatched.
pub fn apply_transcript<C>(transcript: &str, catalog: &[Product], cart: &mut C) -> VoiceOutcome
where
    C: CartSink + ?Sized,
{
    let mut interpretation = interpret(transcript, catalog);
    let resolved = std::mem::take(&mut interpretation.matched);

    for item in resolved {
        match cart.add_to_cart(&item.product, item.quantity) {
            Ok(()) => interpretation.matched.push(item),
            Err(error) => {
                warn!(
                    event_name = "voice.command.item_rejected",
                    product_id = %item.product.id,
                    error = %error,
                    "cart rejected a voice command item"
                );
                interpretation.unmatched.push(item.search_text);
            }
        }
    }

    info!(
        event_name = "voice.command.interpreted",
        matched = interpretation.matched.len(),
        unmatched = interpretation.unmatched.len(),
        "voice command interpreted"
    );
    VoiceOutcome::from(interpretation)
}
