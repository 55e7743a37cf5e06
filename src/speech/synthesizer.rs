// Speech synthesis collaborator contract

use serde::Serialize;
use uuid::Uuid;

/// One utterance handed to the synthesis sink
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    /// Correlates the sink's completion report with the queue
    pub id: Uuid,
    pub text: String,
    /// BCP 47 language tag, e.g. "id-ID"
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Contract for the speech synthesis collaborator.
///
/// Completion reports arrive through the session handle tagged with the
/// utterance id.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak one utterance. Must not block.
    fn speak(&self, utterance: &Utterance);

    /// Cancel whatever is currently being spoken.
    fn cancel(&self);
}
