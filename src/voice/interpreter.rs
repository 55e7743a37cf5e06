// Voice command interpreter - classifies a transcript into a command
//
// Classification is an ordered match: activation, navigation trigger,
// route-slot grammar, create-route grammar, then destination-prefix
// stripping. Recognition output is Indonesian with the odd English
// phrase mixed in, so both languages appear in the phrase tables.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A classified voice command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VoiceCommand {
    /// Wake the microphone
    Activate,
    /// Confirm and begin turn-by-turn guidance
    StartNavigation,
    /// Load one of the six named route slots
    SelectRoute { slot: u8 },
    /// Define a named route slot from two spoken place names
    CreateRoute {
        slot: u8,
        from: String,
        to: String,
    },
    /// Free-text destination to resolve
    SetDestination { query: String },
    /// Nothing recognizable; triggers "not understood" feedback only
    Unknown { raw: String },
}

/// Errors from command classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// A route slot outside 1..=6 was spoken; surfaced as a spoken
    /// range error, never as a command
    #[error("Route slot {0} is outside 1..=6")]
    SlotOutOfRange(u32),
}

/// Whole-utterance activation phrases
const ACTIVATION_PHRASES: &[&str] = &[
    "halo",
    "hello",
    "aktivasi",
    "activate",
    "buka mikrofon",
    "aktifkan",
];

/// Exact navigation triggers
const NAVIGATION_EXACT: &[&str] = &["navigasi", "mulai"];

/// Contained navigation triggers
const NAVIGATION_CONTAINED: &[&str] = &["mulai rute", "mulai navigasi"];

/// Destination prefixes, longest first so "navigasi ke" wins over "ke"
const DESTINATION_PREFIXES: &[&str] = &[
    "pergi ke",
    "navigasi ke",
    "tujuan ke",
    "arahkan ke",
    "navigate to",
    "menuju",
    "go to",
    "tujuan",
    "ke",
];

fn select_route_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rute\s+(satu|dua|tiga|empat|lima|enam|tujuh|delapan|sembilan|sepuluh|\d+)\b")
            .expect("select-route regex is valid")
    })
}

fn create_route_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^buat rute\s+(\S+)\s+dari\s+(.+?)\s+ke\s+(.+)$")
            .expect("create-route regex is valid")
    })
}

/// Map a spoken slot token (word or digits) to its number
fn slot_number(token: &str) -> Option<u32> {
    match token {
        "satu" => Some(1),
        "dua" => Some(2),
        "tiga" => Some(3),
        "empat" => Some(4),
        "lima" => Some(5),
        "enam" => Some(6),
        "tujuh" => Some(7),
        "delapan" => Some(8),
        "sembilan" => Some(9),
        "sepuluh" => Some(10),
        _ => token.parse().ok(),
    }
}

/// Classifies normalized transcripts into structured commands
pub struct CommandInterpreter;

impl CommandInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Lowercase, strip punctuation, collapse whitespace
    fn normalize(transcript: &str) -> String {
        let lowered = transcript.trim().to_lowercase();
        let stripped: String = lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Classify one final transcript.
    pub fn interpret(&self, transcript: &str) -> Result<VoiceCommand, CommandParseError> {
        let text = Self::normalize(transcript);
        crate::debug!("[voice] Interpreting: {:?}", text);

        if text.is_empty() {
            return Ok(VoiceCommand::Unknown {
                raw: transcript.to_string(),
            });
        }

        // 1. Activation phrase, whole utterance or contained
        if ACTIVATION_PHRASES
            .iter()
            .any(|phrase| text == *phrase || contains_phrase(&text, phrase))
        {
            return Ok(VoiceCommand::Activate);
        }

        // 2. Navigation trigger
        if NAVIGATION_EXACT.iter().any(|t| text == *t)
            || NAVIGATION_CONTAINED.iter().any(|t| contains_phrase(&text, t))
        {
            return Ok(VoiceCommand::StartNavigation);
        }

        // 3. Create-route grammar, before the plain slot grammar so
        // "buat rute 2 dari x ke y" is not swallowed by "rute 2"
        if let Some(captures) = create_route_re().captures(&text) {
            let token = &captures[1];
            if let Some(n) = slot_number(token) {
                let slot = validate_slot(n)?;
                return Ok(VoiceCommand::CreateRoute {
                    slot,
                    from: captures[2].trim().to_string(),
                    to: captures[3].trim().to_string(),
                });
            }
        }

        // 4. Route-slot grammar
        if let Some(captures) = select_route_re().captures(&text) {
            if let Some(n) = slot_number(&captures[1]) {
                let slot = validate_slot(n)?;
                return Ok(VoiceCommand::SelectRoute { slot });
            }
        }

        // 5. Everything else is a destination, with any known prefix stripped
        let query = strip_destination_prefix(&text);
        if query.is_empty() {
            return Ok(VoiceCommand::Unknown {
                raw: transcript.to_string(),
            });
        }
        Ok(VoiceCommand::SetDestination {
            query: query.to_string(),
        })
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_slot(n: u32) -> Result<u8, CommandParseError> {
    if (1..=crate::nav_constants::ROUTE_SLOT_COUNT as u32).contains(&n) {
        Ok(n as u8)
    } else {
        Err(CommandParseError::SlotOutOfRange(n))
    }
}

/// Whether `text` contains `phrase` on word boundaries
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.split(' ')
        .collect::<Vec<_>>()
        .windows(phrase.split(' ').count())
        .any(|window| window.join(" ") == phrase)
}

/// Strip the longest known destination prefix, if any
fn strip_destination_prefix(text: &str) -> &str {
    for prefix in DESTINATION_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            if rest.is_empty() || rest.starts_with(' ') {
                return rest.trim();
            }
        }
    }
    text
}

#[cfg(test)]
#[path = "interpreter_test.rs"]
mod tests;
