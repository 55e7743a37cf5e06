// Named route slots - six fixed slots persisted between sessions

mod file;

pub use file::FileRouteStore;

use crate::geo::LatLng;
use crate::nav_constants::ROUTE_SLOT_COUNT;
use serde::{Deserialize, Serialize};

/// A place with the name it was spoken under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedLocation {
    pub name: String,
    pub point: LatLng,
}

/// One of the six named route slots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedRouteSlot {
    /// Slot id in 1..=6
    pub id: u8,
    /// Display name, e.g. "jakarta - bandung"
    pub name: String,
    pub start: Option<NamedLocation>,
    pub end: Option<NamedLocation>,
}

/// Error types for route slot operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteStoreError {
    /// Slot id outside 1..=6
    #[error("Route slot {0} is outside 1..=6")]
    InvalidSlot(u8),
    /// Failed to persist slots
    #[error("Failed to persist route slots: {0}")]
    PersistenceError(String),
    /// Failed to load slots
    #[error("Failed to load route slots: {0}")]
    LoadError(String),
}

/// Contract for the route slot collaborator.
///
/// Six fixed slots keyed 1..=6, independently persisted.
pub trait RouteStore: Send + Sync {
    /// Get a slot, if set.
    fn get(&self, id: u8) -> Result<Option<NamedRouteSlot>, RouteStoreError>;

    /// Set a slot, replacing any previous content.
    #[must_use = "this returns a Result that should be handled"]
    fn set(&mut self, slot: NamedRouteSlot) -> Result<(), RouteStoreError>;

    /// Clear a slot.
    #[must_use = "this returns a Result that should be handled"]
    fn delete(&mut self, id: u8) -> Result<(), RouteStoreError>;

    /// List all set slots, ordered by id.
    fn list(&self) -> Vec<NamedRouteSlot>;
}

/// Validate a slot id against the fixed range.
pub(crate) fn validate_slot_id(id: u8) -> Result<(), RouteStoreError> {
    if (1..=ROUTE_SLOT_COUNT).contains(&id) {
        Ok(())
    } else {
        Err(RouteStoreError::InvalidSlot(id))
    }
}
