// GPS fix filtering - validates raw samples and maintains the best fix
//
// Geolocation providers fall back to an IP-derived default location when
// no real fix is available. Those samples land inside a known bounding
// region with accuracy in the tens of kilometers; accepting them would
// teleport the user across the map. The filter keeps the most accurate
// fix seen so far and anchors the effective position to it whenever an
// incoming sample is untrustworthy.

use crate::geo::{haversine_m, LatLng, LatLngBounds};
use crate::nav_constants::{
    LOW_ACCURACY_THRESHOLD_M, MAX_ACCEPTABLE_ACCURACY_M, POSITION_EPSILON_M,
};
use serde::{Deserialize, Serialize};

/// One raw GPS sample from the geolocation collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GpsFix {
    pub lat: f64,
    pub lng: f64,
    /// Accuracy radius in meters (smaller is better)
    pub accuracy_m: f64,
    /// When the sample was taken
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl GpsFix {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Why a fix was not taken as the new position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionReason {
    /// Inside the default-location region with very poor accuracy;
    /// almost certainly the provider's IP fallback, not a reading
    DefaultRegion,
    /// Accuracy worse than the acceptance cutoff and no improvement on
    /// the retained best fix
    AccuracyTooLow,
}

/// Outcome of ingesting one fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixAssessment {
    /// Fix accepted as the effective position
    Accepted {
        /// Whether the effective position moved beyond the epsilon
        position_changed: bool,
    },
    /// Accepted only because nothing better exists yet; the position is
    /// flagged low-confidence until a real fix arrives
    AcceptedLowConfidence { position_changed: bool },
    /// Fix rejected; the effective position stays anchored to the best
    /// fix. Logged only, never surfaced to the user.
    Rejected(RejectionReason),
}

/// Configuration for location filtering
#[derive(Debug, Clone)]
pub struct LocationFilterConfig {
    /// Bounding region of the provider's default/cached location
    pub default_region: LatLngBounds,
    /// Accuracy above which a default-region fix is treated as fallback (meters)
    pub low_accuracy_threshold_m: f64,
    /// Accuracy above which any fix is rejected unless it improves on
    /// the best fix (meters)
    pub max_acceptable_accuracy_m: f64,
    /// Minimum effective-position movement before an update is reported (meters)
    pub movement_epsilon_m: f64,
}

impl Default for LocationFilterConfig {
    fn default() -> Self {
        Self {
            // Greater Jakarta, where the provider's IP fallback lands
            default_region: LatLngBounds::new(
                LatLng::new(-6.4, 106.6),
                LatLng::new(-6.0, 107.0),
            ),
            low_accuracy_threshold_m: LOW_ACCURACY_THRESHOLD_M,
            max_acceptable_accuracy_m: MAX_ACCEPTABLE_ACCURACY_M,
            movement_epsilon_m: POSITION_EPSILON_M,
        }
    }
}

/// Validates and merges raw GPS samples into a trusted position.
///
/// Owns the best fix for the session: the lowest-accuracy sample seen,
/// replaced only by a better sample or by the fix following an explicit
/// fresh request.
pub struct LocationFilter {
    config: LocationFilterConfig,
    /// Most accurate fix retained so far
    best_fix: Option<GpsFix>,
    /// Effective position last reported to the caller
    last_effective: Option<LatLng>,
    /// Whether the current best fix is a flagged default-region accept
    low_confidence: bool,
    /// Set by request_fresh(); the next fix supersedes the best fix
    fresh_pending: bool,
}

impl LocationFilter {
    /// Create a filter with default configuration
    pub fn new() -> Self {
        Self::with_config(LocationFilterConfig::default())
    }

    /// Create a filter with custom configuration
    pub fn with_config(config: LocationFilterConfig) -> Self {
        Self {
            config,
            best_fix: None,
            last_effective: None,
            low_confidence: false,
            fresh_pending: false,
        }
    }

    /// The most accurate fix retained so far
    pub fn best_fix(&self) -> Option<&GpsFix> {
        self.best_fix.as_ref()
    }

    /// The position the rest of the system should trust right now
    pub fn effective_position(&self) -> Option<LatLng> {
        self.last_effective
    }

    /// Whether the current position comes from a flagged low-confidence fix
    pub fn is_low_confidence(&self) -> bool {
        self.low_confidence
    }

    /// Mark that an explicit fresh fix was requested. The next ingested
    /// fix replaces the best fix outright and is reported as a forced
    /// position update.
    pub fn request_fresh(&mut self) {
        crate::debug!("[location] Fresh fix requested, next fix supersedes best fix");
        self.fresh_pending = true;
    }

    /// Ingest one raw fix and assess it.
    ///
    /// Side effects (marker redraw, progress tracking) are the caller's
    /// responsibility; the assessment says whether the effective
    /// position moved.
    pub fn ingest(&mut self, fix: GpsFix) -> FixAssessment {
        if self.fresh_pending {
            self.fresh_pending = false;
            self.low_confidence = false;
            crate::info!(
                "[location] Fresh fix accepted at ({:.5}, {:.5}) accuracy={}m",
                fix.lat,
                fix.lng,
                fix.accuracy_m
            );
            let position = fix.position();
            self.best_fix = Some(fix);
            // Forced refresh always reports a change
            self.last_effective = Some(position);
            return FixAssessment::Accepted {
                position_changed: true,
            };
        }

        let position = fix.position();
        let looks_like_default = self.config.default_region.contains(position)
            && fix.accuracy_m > self.config.low_accuracy_threshold_m;

        if looks_like_default {
            if self.best_fix.is_none() {
                // Nothing better exists; keep it but flag it so callers
                // know the position is a guess
                crate::warn!(
                    "[location] Default-region fix accepted low-confidence, accuracy={}m",
                    fix.accuracy_m
                );
                self.low_confidence = true;
                self.best_fix = Some(fix);
                let changed = self.update_effective(position);
                return FixAssessment::AcceptedLowConfidence {
                    position_changed: changed,
                };
            }
            crate::debug!(
                "[location] Rejected default-region fix, accuracy={}m",
                fix.accuracy_m
            );
            return FixAssessment::Rejected(RejectionReason::DefaultRegion);
        }

        let best_accuracy = self.best_fix.as_ref().map(|b| b.accuracy_m);
        if fix.accuracy_m > self.config.max_acceptable_accuracy_m {
            let improves = best_accuracy.map(|b| fix.accuracy_m < b).unwrap_or(true);
            if !improves {
                crate::debug!(
                    "[location] Rejected fix with accuracy {}m (best is {:?}m)",
                    fix.accuracy_m,
                    best_accuracy
                );
                return FixAssessment::Rejected(RejectionReason::AccuracyTooLow);
            }
        }

        // Accepted: the raw fix is the effective position, and it becomes
        // the best fix if it improves on it
        if best_accuracy.map(|b| fix.accuracy_m <= b).unwrap_or(true) {
            self.best_fix = Some(fix.clone());
            self.low_confidence = false;
        }

        let changed = self.update_effective(position);
        FixAssessment::Accepted {
            position_changed: changed,
        }
    }

    /// Move the effective position, reporting whether it crossed the epsilon
    fn update_effective(&mut self, position: LatLng) -> bool {
        let changed = match self.last_effective {
            Some(previous) => haversine_m(previous, position) > self.config.movement_epsilon_m,
            None => true,
        };
        if changed {
            self.last_effective = Some(position);
        }
        changed
    }
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
