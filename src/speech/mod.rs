// Spoken output - synthesis contract and the announcement queue

mod queue;
mod synthesizer;

pub use queue::{AnnouncementQueue, Priority, SpeechConfig};
pub use synthesizer::{SpeechSynthesizer, Utterance};
