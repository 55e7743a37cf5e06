// Instruction tracking - retires passed steps and phrases announcements
//
// Progress is measured as the cumulative path length at the polyline
// vertex nearest the current position. The scan is linear and runs on
// every position update; routes are short enough that no spatial index
// is warranted.

use crate::geo::{nearest_vertex, LatLng};
use crate::nav_constants::{
    INSTRUCTION_ANNOUNCE_M, INSTRUCTION_IMMEDIATE_M, INSTRUCTION_RETIRE_M,
};
use crate::routing::Route;

/// Configuration for instruction tracking
#[derive(Debug, Clone)]
pub struct GuidanceConfig {
    /// Remaining distance below which an instruction is retired (meters)
    pub retire_m: f64,
    /// Remaining distance at or below which an instruction is announced (meters)
    pub announce_m: f64,
    /// Remaining distance below which the phrase drops the distance prefix (meters)
    pub immediate_m: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            retire_m: INSTRUCTION_RETIRE_M,
            announce_m: INSTRUCTION_ANNOUNCE_M,
            immediate_m: INSTRUCTION_IMMEDIATE_M,
        }
    }
}

/// Result of mapping one position update onto the route
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Cumulative path length traveled from the route start (meters)
    pub distance_traveled_m: f64,
    /// Distance left to the destination (meters)
    pub remaining_to_destination_m: f64,
    /// Indices of instructions retired by this update
    pub retired: Vec<usize>,
    /// Phrases to speak, in instruction order
    pub announcements: Vec<String>,
}

/// Tracks progress against the active route.
///
/// Mutates the `announced`/`retired` flags on the route's instructions;
/// both flags are monotonic and reset only when the route itself is
/// rebuilt.
pub struct InstructionTracker {
    config: GuidanceConfig,
}

impl InstructionTracker {
    /// Create a tracker with default configuration
    pub fn new() -> Self {
        Self::with_config(GuidanceConfig::default())
    }

    /// Create a tracker with custom configuration
    pub fn with_config(config: GuidanceConfig) -> Self {
        Self { config }
    }

    /// Map a position update onto the route.
    ///
    /// Returns None when the route has no geometry to scan.
    pub fn on_position(&self, route: &mut Route, position: LatLng) -> Option<ProgressUpdate> {
        let vertex = nearest_vertex(&route.polyline, position)?;
        let distance_traveled_m = route.cumulative_m[vertex];
        let remaining_to_destination_m =
            (route.total_distance_m - distance_traveled_m).max(0.0);

        let mut retired = Vec::new();
        let mut announcements = Vec::new();

        for (i, instruction) in route.instructions.iter_mut().enumerate() {
            let remaining = (instruction.distance_from_start_m - distance_traveled_m).max(0.0);

            if !instruction.retired && remaining < self.config.retire_m {
                instruction.retired = true;
                retired.push(i);
                crate::debug!(
                    "[guidance] Retired instruction {} ({}m from start)",
                    i,
                    instruction.distance_from_start_m
                );
            }

            if !instruction.announced && remaining > 0.0 && remaining <= self.config.announce_m {
                instruction.announced = true;
                let phrase = if remaining >= self.config.immediate_m {
                    format!(
                        "After {} meters, {}",
                        remaining.round() as i64,
                        instruction.text
                    )
                } else {
                    format!("{} now", instruction.text)
                };
                crate::info!("[guidance] Announcing: {}", phrase);
                announcements.push(phrase);
            }
        }

        Some(ProgressUpdate {
            distance_traveled_m,
            remaining_to_destination_m,
            retired,
            announcements,
        })
    }
}

impl Default for InstructionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
