// Session orchestration - one event loop owns every piece of mutable
// navigation state; collaborators only ever talk to it through events

mod controller;
mod handle;

pub use controller::{
    NavigationSession, RouteSummary, SessionConfig, SessionDeps, SessionEvent, SessionStatus,
};
pub use handle::{SessionHandle, SessionHandleError};
