// Microphone lifecycle - the recognition state machine and its contract

mod lifecycle;
mod recognizer;

pub use lifecycle::{MicAction, MicEvent, MicrophoneLifecycle, MicrophoneState};
pub use recognizer::{RecognitionErrorCode, SpeechRecognizer};
