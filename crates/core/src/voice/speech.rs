//! Speech-to-text collaborator boundary

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SpeechError {
    #[error("speech recognition is not supported on this device")]
    Unsupported,
    #[error("microphone permission was denied")]
    PermissionDenied,
    #[error("no speech was detected")]
    NoSpeech,
    #[error("speech recognition failed: {0}")]
    Other(String),
}

impl SpeechError {
    /// Classifies a recognizer error code such as `not-allowed` or `no-speech`.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "unsupported" | "not-supported" => Self::Unsupported,
            "not-allowed" | "service-not-allowed" | "permission-denied" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Missing capability is reported differently from a failed listening attempt.
    pub fn is_capability_missing(&self) -> bool {
        matches!(self, Self::Unsupported)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unsupported => {
                "Voice search is not supported on this device. Please try a browser with speech recognition."
            }
            Self::PermissionDenied => "Microphone access is required to use voice search.",
            Self::NoSpeech => "No speech detected. Please try again.",
            Self::Other(_) => "Voice search failed. Please try again.",
        }
    }
}

/// Produces at most one final transcript per call, or one classified error.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn listen(&self, language: &str) -> Result<String, SpeechError>;
}

/// Replays a result captured elsewhere, e.g. a transcript typed on the command line.
#[derive(Clone, Debug)]
pub struct ScriptedRecognizer {
    result: Result<String, SpeechError>,
}

impl ScriptedRecognizer {
    pub fn transcript(text: impl Into<String>) -> Self {
        Self { result: Ok(text.into()) }
    }

    pub fn failing(error: SpeechError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&self, _language: &str) -> Result<String, SpeechError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScriptedRecognizer, SpeechError, SpeechRecognizer};

    #[test]
    fn recognizer_codes_are_classified() {
        assert_eq!(SpeechError::from_code("not-allowed"), SpeechError::PermissionDenied);
        assert_eq!(SpeechError::from_code("service-not-allowed"), SpeechError::PermissionDenied);
        assert_eq!(SpeechError::from_code("no-speech"), SpeechError::NoSpeech);
        assert_eq!(SpeechError::from_code("unsupported"), SpeechError::Unsupported);
        assert_eq!(SpeechError::from_code("network"), SpeechError::Other("network".to_owned()));
    }

    #[test]
    fn only_unsupported_means_missing_capability() {
        assert!(SpeechError::Unsupported.is_capability_missing());
        assert!(!SpeechError::NoSpeech.is_capability_missing());
    }

    #[test]
    fn user_messages_are_specific() {
        assert_eq!(
            SpeechError::PermissionDenied.user_message(),
            "Microphone access is required to use voice search."
        );
        assert_eq!(SpeechError::NoSpeech.user_message(), "No speech detected. Please try again.");
        assert_eq!(
            SpeechError::Other("aborted".to_owned()).user_message(),
            "Voice search failed. Please try again."
        );
    }

    #[tokio::test]
    async fn scripted_recognizer_replays_its_result() {
        let heard = ScriptedRecognizer::transcript("add 2 breads").listen("en-US").await;
        let failed = ScriptedRecognizer::failing(SpeechError::NoSpeech).listen("en-US").await;

        assert_eq!(heard, Ok("add 2 breads".to_owned()));
        assert_eq!(failed, Err(SpeechError::NoSpeech));
    }
}
