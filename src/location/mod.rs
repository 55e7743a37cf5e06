// Location filtering - turns raw GPS samples into a trusted position

mod filter;
mod provider;

pub use filter::{FixAssessment, GpsFix, LocationFilter, LocationFilterConfig, RejectionReason};
pub use provider::{GeolocationError, GeolocationProvider};
