//! Voice ordering: a spoken or typed command such as "add 2 breads and a cake" is parsed into
//! intents, resolved against the catalog, applied to the cart and summarized as a
//! [`VoiceOutcome`] with user-facing notifications.

mod outcome;
mod parser;
mod resolver;
mod session;
mod speech;

pub use outcome::{NotificationLevel, VoiceNotification, VoiceOutcome, EXAMPLE_COMMAND};
pub use parser::{parse_command, VoiceIntent};
pub use resolver::{find_product, interpret, resolve, Interpretation, MatchedItem};
pub use session::{apply_transcript, CartSink, VoiceCommandSession};
pub use speech::{ScriptedRecognizer, SpeechError, SpeechRecognizer};
