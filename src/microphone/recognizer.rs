// Speech recognition collaborator contract

use serde::Serialize;

/// Recognition error codes, mapped from the collaborator's string codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecognitionErrorCode {
    /// The user denied microphone access; recovery requires a gesture
    PermissionDenied,
    /// Nothing was said before the recognizer gave up; transient
    NoSpeech,
    /// Recognition was aborted mid-utterance; transient
    Aborted,
    /// Network failure between the recognizer and its service
    Network,
    /// Anything else, carried verbatim
    Other(String),
}

impl RecognitionErrorCode {
    /// Map the collaborator's string code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" | "permission-denied" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "network" => Self::Network,
            other => Self::Other(other.to_string()),
        }
    }

    /// Transient errors are ignored: no state change, no user-facing message.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NoSpeech | Self::Aborted)
    }
}

/// Contract for the speech recognition collaborator.
///
/// Transcripts and lifecycle events (`start`, `end`, `error`) arrive
/// through the session handle; this trait only carries control calls.
/// Recognition runs in continuous mode, tagged with the session locale.
pub trait SpeechRecognizer: Send + Sync {
    /// Open the microphone and start recognizing.
    fn start(&self);

    /// Stop recognizing and close the microphone.
    fn stop(&self);
}
