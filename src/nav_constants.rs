//! Centralized constants for the navigation core.
//!
//! All navigation-related magic numbers are defined here with documentation
//! explaining their purpose and constraints. This module eliminates
//! scattered magic numbers throughout the navigation code.

// =============================================================================
// LOCATION FILTERING
// =============================================================================

/// Maximum accuracy radius for a GPS fix to be accepted outright (meters).
///
/// Fixes worse than this are rejected unless they still improve on the
/// best fix retained so far. 500 m covers cell-tower positioning while
/// excluding IP-based guesses.
pub const MAX_ACCEPTABLE_ACCURACY_M: f64 = 500.0;

/// Accuracy radius above which a fix is treated as a default/cached
/// location rather than a real reading (meters).
///
/// IP-based fallback positions report accuracy on the order of tens of
/// kilometers. Combined with the default-region bounding box this
/// identifies fixes that merely echo the provider's fallback location.
pub const LOW_ACCURACY_THRESHOLD_M: f64 = 10_000.0;

/// Minimum movement of the effective position before a position update
/// is reported (meters).
///
/// Suppresses marker/tracking churn from sub-meter GPS jitter.
pub const POSITION_EPSILON_M: f64 = 1.0;

// =============================================================================
// ROUTE RECOMPUTATION
// =============================================================================

/// Destination movement that forces a full route rebuild (meters).
///
/// Roughly 0.001 degrees of latitude. A destination change beyond this
/// is a genuinely new route: the old route, its hash, and all
/// announcement state are discarded.
pub const DESTINATION_REBUILD_THRESHOLD_M: f64 = 111.0;

/// Start-point movement that triggers an in-place waypoint update (meters).
///
/// Roughly 0.0001 degrees of latitude. Below this the route is left
/// untouched; above it the start waypoint is replaced without
/// re-announcing the route.
pub const START_UPDATE_THRESHOLD_M: f64 = 11.0;

/// Window after a route announcement during which a newly found route is
/// not re-announced (milliseconds).
///
/// Routing callbacks can fire in rapid succession for one logical
/// recompute; this debounce keeps the spoken output to one announcement.
pub const ROUTE_ANNOUNCE_DEBOUNCE_MS: u64 = 1000;

// =============================================================================
// INSTRUCTION TRACKING
// =============================================================================

/// Remaining distance below which an instruction is retired (meters).
///
/// A retired instruction is hidden and never shown again; the maneuver
/// is considered passed.
pub const INSTRUCTION_RETIRE_M: f64 = 50.0;

/// Remaining distance at or below which an instruction is announced (meters).
///
/// Announced once per instruction, while `remaining` is still positive.
/// Must be larger than the retirement radius so every instruction is
/// spoken before it disappears.
pub const INSTRUCTION_ANNOUNCE_M: f64 = 200.0;

/// Remaining distance below which the announcement drops the distance
/// prefix and phrases the maneuver as immediate (meters).
pub const INSTRUCTION_IMMEDIATE_M: f64 = 2.0;

// =============================================================================
// MICROPHONE LIFECYCLE
// =============================================================================

/// How long the microphone waits for a navigation confirmation after a
/// destination is resolved (milliseconds).
pub const CONFIRMATION_TIMEOUT_MS: u64 = 10_000;

/// Delay before recognition is restarted after an unexpected end event
/// (milliseconds).
///
/// Restart is re-validated against the lifecycle state when the delay
/// elapses; it is never applied while navigating.
pub const RECOGNITION_RESTART_DELAY_MS: u64 = 1000;

// =============================================================================
// ANNOUNCEMENT QUEUE
// =============================================================================

/// Window within which identical consecutive announcement text is
/// suppressed (milliseconds). Urgent announcements bypass the window.
pub const SPEECH_DEDUP_WINDOW_MS: u64 = 5000;

/// Grace delay after an utterance completes before the next queued
/// segment is dispatched (milliseconds).
///
/// Gives the synthesis sink time to settle between back-to-back
/// sentences of a multi-segment announcement.
pub const UTTERANCE_GRACE_DELAY_MS: u64 = 150;

/// Default speech language tag for spoken output.
pub const SPEECH_LANG: &str = "id-ID";

/// Default speech rate passed to the synthesis sink.
pub const SPEECH_RATE: f32 = 1.0;

/// Default speech pitch passed to the synthesis sink.
pub const SPEECH_PITCH: f32 = 1.0;

// =============================================================================
// ROUTE STORE
// =============================================================================

/// Number of named route slots. Slots are keyed 1 through this value.
pub const ROUTE_SLOT_COUNT: u8 = 6;

// =============================================================================
// SESSION
// =============================================================================

/// How often the session loop wakes to check pending deadlines when no
/// event arrives (milliseconds).
pub const SESSION_POLL_INTERVAL_MS: u64 = 50;

/// Similarity threshold for fuzzy gazetteer lookup (0.0 - 1.0).
///
/// High enough that only near-misses of a known place name match;
/// everything else falls through to the external geocoder.
pub const GAZETTEER_FUZZY_THRESHOLD: f64 = 0.85;

/// Quantization step applied to polyline coordinates before hashing
/// (degrees). ~1e-5 degrees is about a meter, so routes that differ
/// only by floating-point noise hash identically.
pub const POLYLINE_HASH_QUANTUM: f64 = 1e-5;
