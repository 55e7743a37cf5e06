use super::*;
use crate::events::NullEventEmitter;
use crate::geo::LatLng;
use crate::microphone::SpeechRecognizer;
use crate::route_store::{NamedRouteSlot, RouteStore, RouteStoreError};
use crate::routing::{RouteResponse, RoutingBackend, RoutingError};
use crate::speech::{SpeechSynthesizer, Utterance};
use crate::voice::{DestinationResolver, Gazetteer, GeocodeError, Geocoder, ResolvedDestination};
use async_trait::async_trait;
use std::sync::Arc;

struct NoopSynth;

impl SpeechSynthesizer for NoopSynth {
    fn speak(&self, _utterance: &Utterance) {}
    fn cancel(&self) {}
}

struct NoopRecognizer;

impl SpeechRecognizer for NoopRecognizer {
    fn start(&self) {}
    fn stop(&self) {}
}

struct NoopRouter;

#[async_trait]
impl RoutingBackend for NoopRouter {
    async fn compute_route(&self, _waypoints: [LatLng; 2]) -> Result<RouteResponse, RoutingError> {
        Err(RoutingError::NoRoute)
    }
}

struct NoopGeocoder;

#[async_trait]
impl Geocoder for NoopGeocoder {
    async fn geocode(&self, _query: &str) -> Result<ResolvedDestination, GeocodeError> {
        Err(GeocodeError::NotFound)
    }
}

struct EmptyStore;

impl RouteStore for EmptyStore {
    fn get(&self, _id: u8) -> Result<Option<NamedRouteSlot>, RouteStoreError> {
        Ok(None)
    }
    fn set(&mut self, _slot: NamedRouteSlot) -> Result<(), RouteStoreError> {
        Ok(())
    }
    fn delete(&mut self, _id: u8) -> Result<(), RouteStoreError> {
        Ok(())
    }
    fn list(&self) -> Vec<NamedRouteSlot> {
        vec![]
    }
}

fn deps() -> SessionDeps {
    SessionDeps {
        routing: Arc::new(NoopRouter),
        resolver: DestinationResolver::new(Gazetteer::new(), Arc::new(NoopGeocoder)),
        recognizer: Arc::new(NoopRecognizer),
        synthesizer: Arc::new(NoopSynth),
        store: Box::new(EmptyStore),
        emitter: Arc::new(NullEventEmitter),
        geolocation: None,
    }
}

#[test]
fn test_status_reflects_pushed_fix() {
    let handle = SessionHandle::spawn(deps(), SessionConfig::default());
    handle
        .push_fix(GpsFix {
            lat: -6.2088,
            lng: 106.8456,
            accuracy_m: 10.0,
            timestamp: chrono::Utc::now(),
        })
        .unwrap();

    // Events are handled in order, so the snapshot sees the fix
    let status = handle.status().unwrap();
    assert_eq!(status.position, Some(LatLng::new(-6.2088, 106.8456)));
    assert!(!status.is_navigating);
}

#[test]
fn test_transcript_opens_microphone() {
    let handle = SessionHandle::spawn(deps(), SessionConfig::default());
    handle.push_transcript("halo", true).unwrap();

    let status = handle.status().unwrap();
    assert_eq!(status.microphone, crate::microphone::MicrophoneState::Listening);
}

#[test]
fn test_drop_joins_session_thread() {
    let handle = SessionHandle::spawn(deps(), SessionConfig::default());
    handle.push_user_gesture().unwrap();
    drop(handle);
}
