// Voice-driven turn-by-turn navigation core.
//
// The session module owns the event loop; everything else is a
// collaborator it drives: GPS filtering, route recomputation,
// instruction tracking, voice command interpretation, the microphone
// lifecycle, the announcement queue, and the named route slots.

pub mod events;
pub mod geo;
pub mod guidance;
pub mod location;
pub mod microphone;
pub mod nav_constants;
pub mod route_store;
pub mod routing;
pub mod session;
pub mod speech;
pub mod voice;

// Re-export log macros for use throughout the crate
pub use tracing::{debug, error, info, trace, warn};

pub use events::{NavigationEventEmitter, NullEventEmitter};
pub use geo::{LatLng, LatLngBounds};
pub use location::{GeolocationProvider, GpsFix, LocationFilter};
pub use microphone::{MicrophoneLifecycle, MicrophoneState, SpeechRecognizer};
pub use route_store::{FileRouteStore, NamedRouteSlot, RouteStore};
pub use routing::{Route, RouteEngine, RoutingBackend};
pub use session::{SessionConfig, SessionDeps, SessionHandle, SessionStatus};
pub use speech::SpeechSynthesizer;
pub use voice::{CommandInterpreter, DestinationResolver, Gazetteer, Geocoder, VoiceCommand};
