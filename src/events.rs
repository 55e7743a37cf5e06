// Navigation events for frontend notification
// Defines event payloads and emission trait for testability

use serde::Serialize;

use crate::geo::LatLng;
use crate::location::RejectionReason;
use crate::microphone::MicrophoneState;

/// Event names as constants for consistency
pub mod event_names {
    pub const POSITION_UPDATED: &str = "position_updated";
    pub const POSITION_REJECTED: &str = "position_rejected";
    pub const ROUTE_FOUND: &str = "route_found";
    pub const ROUTE_ERROR: &str = "route_error";
    pub const INSTRUCTIONS_UPDATED: &str = "instructions_updated";
    pub const NAVIGATION_STARTED: &str = "navigation_started";
    pub const MICROPHONE_STATE_CHANGED: &str = "microphone_state_changed";
    pub const DESTINATION_RESOLVED: &str = "destination_resolved";
    pub const ANNOUNCEMENT_COMPLETED: &str = "announcement_completed";
    pub const ROUTE_SLOT_SAVED: &str = "route_slot_saved";
}

/// Payload for position_updated event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdatedPayload {
    /// The effective position after filtering
    pub position: LatLng,
    /// Accuracy radius of the underlying fix in meters
    pub accuracy_m: f64,
    /// True when the position comes from a default-region fix accepted
    /// only because no better fix exists yet
    pub low_confidence: bool,
    /// ISO 8601 timestamp of the update
    pub timestamp: String,
}

/// Payload for position_rejected event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionRejectedPayload {
    /// Why the fix was not taken as the new position
    pub reason: RejectionReason,
    /// Accuracy radius of the rejected fix in meters
    pub accuracy_m: f64,
}

/// Payload for route_found event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteFoundPayload {
    /// Total route length in meters
    pub total_distance_m: f64,
    /// Estimated travel time in seconds
    pub total_time_secs: f64,
    /// Number of turn-by-turn instructions
    pub instruction_count: usize,
    /// Hash of the route polyline, stable across duplicate callbacks
    pub route_hash: u64,
}

/// Payload for route_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorPayload {
    /// Descriptive error message
    pub message: String,
}

/// Payload for instructions_updated event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsUpdatedPayload {
    /// Cumulative distance traveled along the route in meters
    pub distance_traveled_m: f64,
    /// Distance left to the destination in meters
    pub remaining_m: f64,
    /// Indices of instructions retired by this update
    pub retired: Vec<usize>,
}

/// Payload for navigation_started event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationStartedPayload {
    /// Display name of the destination
    pub destination: String,
    /// ISO 8601 timestamp when navigation started
    pub timestamp: String,
}

/// Payload for microphone_state_changed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicrophoneStateChangedPayload {
    /// New lifecycle state
    pub state: MicrophoneState,
    /// Whether turn-by-turn guidance is active
    pub is_navigating: bool,
    /// Whether a user gesture is required before recognition may restart
    pub awaiting_user_gesture: bool,
}

/// Payload for destination_resolved event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResolvedPayload {
    /// The query as spoken
    pub query: String,
    /// Resolved display name
    pub display_name: String,
    /// Resolved coordinate
    pub position: LatLng,
    /// Whether the gazetteer answered (false = external geocoder)
    pub from_gazetteer: bool,
}

/// Payload for announcement_completed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementCompletedPayload {
    /// Identifier of the completed announcement
    pub announcement_id: uuid::Uuid,
}

/// Payload for route_slot_saved event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSlotSavedPayload {
    /// Slot id in 1..=6
    pub slot: u8,
    /// Display name of the stored route
    pub name: String,
}

/// Trait for emitting navigation events
/// Allows mocking in tests while using a real UI bridge in production
pub trait NavigationEventEmitter: Send + Sync {
    /// Emit position_updated event
    fn emit_position_updated(&self, payload: PositionUpdatedPayload);

    /// Emit position_rejected event
    fn emit_position_rejected(&self, payload: PositionRejectedPayload);

    /// Emit route_found event
    fn emit_route_found(&self, payload: RouteFoundPayload);

    /// Emit route_error event
    fn emit_route_error(&self, payload: RouteErrorPayload);

    /// Emit instructions_updated event
    fn emit_instructions_updated(&self, payload: InstructionsUpdatedPayload);

    /// Emit navigation_started event
    fn emit_navigation_started(&self, payload: NavigationStartedPayload);

    /// Emit microphone_state_changed event
    fn emit_microphone_state_changed(&self, payload: MicrophoneStateChangedPayload);

    /// Emit destination_resolved event
    fn emit_destination_resolved(&self, payload: DestinationResolvedPayload);

    /// Emit announcement_completed event
    fn emit_announcement_completed(&self, payload: AnnouncementCompletedPayload);

    /// Emit route_slot_saved event
    fn emit_route_slot_saved(&self, payload: RouteSlotSavedPayload);
}

/// Emitter that discards every event, for headless use and tests
#[derive(Debug, Default)]
pub struct NullEventEmitter;

impl NavigationEventEmitter for NullEventEmitter {
    fn emit_position_updated(&self, _payload: PositionUpdatedPayload) {}
    fn emit_position_rejected(&self, _payload: PositionRejectedPayload) {}
    fn emit_route_found(&self, _payload: RouteFoundPayload) {}
    fn emit_route_error(&self, _payload: RouteErrorPayload) {}
    fn emit_instructions_updated(&self, _payload: InstructionsUpdatedPayload) {}
    fn emit_navigation_started(&self, _payload: NavigationStartedPayload) {}
    fn emit_microphone_state_changed(&self, _payload: MicrophoneStateChangedPayload) {}
    fn emit_destination_resolved(&self, _payload: DestinationResolvedPayload) {}
    fn emit_announcement_completed(&self, _payload: AnnouncementCompletedPayload) {}
    fn emit_route_slot_saved(&self, _payload: RouteSlotSavedPayload) {}
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
