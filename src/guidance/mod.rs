// Guidance - maps position onto the route and drives instruction
// retirement and proximity announcements

mod tracker;

pub use tracker::{GuidanceConfig, InstructionTracker, ProgressUpdate};
