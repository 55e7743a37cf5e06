// Voice command interpretation and destination resolution

mod gazetteer;
mod interpreter;
mod resolver;

pub use gazetteer::{Gazetteer, GazetteerHit};
pub use interpreter::{CommandInterpreter, CommandParseError, VoiceCommand};
pub use resolver::{DestinationResolver, GeocodeError, Geocoder, ResolvedDestination};
