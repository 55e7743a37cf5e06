// Geolocation collaborator contract

use serde::{Deserialize, Serialize};

/// Error event from the geolocation collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationError {
    /// Provider-specific error code
    pub code: i32,
    /// Descriptive error message
    pub message: String,
}

/// Contract for the geolocation collaborator.
///
/// Continuous fixes and error events arrive through the session handle;
/// this trait only covers the explicit one-shot request. Implementations
/// must bypass any position cache so the next fix is a genuinely fresh
/// reading.
pub trait GeolocationProvider: Send + Sync {
    /// Request one fresh, uncached fix. The result arrives as a regular
    /// fix event.
    fn request_fresh_fix(&self);
}
