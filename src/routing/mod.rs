// Route computation - backend contract, route model, and recompute engine

mod backend;
mod engine;
mod route;

pub use backend::{RouteStep, RoutingBackend, RoutingError, RouteResponse};
pub use engine::{RecomputePlan, RouteEngine, RouteEngineConfig, RouteOutcome};
pub use route::{polyline_hash, Route, RouteInstruction};
