// Simulated voice-guided drive, no hardware required.
//
// A scripted conversation activates the microphone, asks for a route to
// Monas, and confirms navigation; scripted GPS fixes then drive the car
// along the route so instruction announcements fire on approach.
//
//   cargo run --example simulated_drive

use pandu::geo::{cumulative_distances_m, LatLng};
use pandu::location::GpsFix;
use pandu::microphone::SpeechRecognizer;
use pandu::route_store::FileRouteStore;
use pandu::routing::{RouteResponse, RouteStep, RoutingBackend, RoutingError};
use pandu::session::{SessionConfig, SessionDeps, SessionHandle};
use pandu::speech::{SpeechSynthesizer, Utterance};
use pandu::voice::{DestinationResolver, Gazetteer, GeocodeError, Geocoder, ResolvedDestination};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Synthesis sink that prints to the console and reports completion
#[derive(Default)]
struct ConsoleSynth {
    finished: Mutex<Vec<Uuid>>,
}

impl SpeechSynthesizer for ConsoleSynth {
    fn speak(&self, utterance: &Utterance) {
        println!("  [tts] {}", utterance.text);
        self.finished.lock().unwrap().push(utterance.id);
    }

    fn cancel(&self) {
        println!("  [tts] (cancelled)");
    }
}

struct ConsoleRecognizer;

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(&self) {
        println!("  [mic] recognition started");
    }

    fn stop(&self) {
        println!("  [mic] recognition stopped");
    }
}

/// Backend that routes along the straight line between the waypoints
struct StraightLineRouter;

#[async_trait]
impl RoutingBackend for StraightLineRouter {
    async fn compute_route(&self, waypoints: [LatLng; 2]) -> Result<RouteResponse, RoutingError> {
        let [start, end] = waypoints;
        let polyline: Vec<LatLng> = (0..=20)
            .map(|i| {
                let t = i as f64 / 20.0;
                LatLng::new(
                    start.lat + (end.lat - start.lat) * t,
                    start.lng + (end.lng - start.lng) * t,
                )
            })
            .collect();
        let cumulative = cumulative_distances_m(&polyline);
        let total = cumulative.last().copied().unwrap_or(0.0);
        Ok(RouteResponse {
            instructions: vec![
                RouteStep {
                    text: "Belok kanan ke Jalan Medan Merdeka".to_string(),
                    distance_from_start_m: total * 0.4,
                },
                RouteStep {
                    text: "Belok kiri ke Jalan Silang Monas".to_string(),
                    distance_from_start_m: total * 0.7,
                },
                RouteStep {
                    text: "Tiba di tujuan".to_string(),
                    distance_from_start_m: total,
                },
            ],
            polyline,
            total_distance_m: total,
            total_time_secs: total / 11.0,
        })
    }
}

struct NoopGeocoder;

#[async_trait]
impl Geocoder for NoopGeocoder {
    async fn geocode(&self, _query: &str) -> Result<ResolvedDestination, GeocodeError> {
        Err(GeocodeError::NotFound)
    }
}

/// Report finished utterances back and give the queue time to advance
fn pump_speech(handle: &SessionHandle, synth: &ConsoleSynth) {
    for _ in 0..20 {
        std::thread::sleep(Duration::from_millis(200));
        let ids: Vec<Uuid> = synth.finished.lock().unwrap().drain(..).collect();
        if ids.is_empty() {
            return;
        }
        for id in ids {
            let _ = handle.push_utterance_finished(id);
        }
    }
}

fn fix(lat: f64, lng: f64) -> GpsFix {
    GpsFix {
        lat,
        lng,
        accuracy_m: 8.0,
        timestamp: chrono::Utc::now(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let synth = Arc::new(ConsoleSynth::default());
    let store = FileRouteStore::new(std::env::temp_dir().join("pandu-demo-routes.json"));
    let deps = SessionDeps {
        routing: Arc::new(StraightLineRouter),
        resolver: DestinationResolver::new(Gazetteer::new(), Arc::new(NoopGeocoder)),
        recognizer: Arc::new(ConsoleRecognizer),
        synthesizer: synth.clone(),
        store: Box::new(store),
        emitter: Arc::new(pandu::NullEventEmitter),
        geolocation: None,
    };
    let handle = SessionHandle::spawn(deps, SessionConfig::default());

    let start = LatLng::new(-6.2088, 106.8456);
    let monas = LatLng::new(-6.1754, 106.8272);

    println!("== GPS fix acquired ==");
    handle.push_fix(fix(start.lat, start.lng)).unwrap();

    println!("== \"halo\" ==");
    handle.push_transcript("halo", true).unwrap();
    pump_speech(&handle, &synth);

    println!("== \"pergi ke monas\" ==");
    handle.push_transcript("pergi ke monas", true).unwrap();
    pump_speech(&handle, &synth);

    println!("== \"mulai\" ==");
    handle.push_transcript("mulai", true).unwrap();
    pump_speech(&handle, &synth);

    println!("== driving ==");
    for i in 1..=20 {
        let t = i as f64 / 20.0;
        let position = LatLng::new(
            start.lat + (monas.lat - start.lat) * t,
            start.lng + (monas.lng - start.lng) * t,
        );
        handle.push_fix(fix(position.lat, position.lng)).unwrap();
        pump_speech(&handle, &synth);
    }

    let status = handle.status().unwrap();
    println!(
        "== arrived: traveled {:.0} m, {:.0} m remaining ==",
        status.distance_traveled_m.unwrap_or(0.0),
        status.remaining_m.unwrap_or(0.0)
    );
}
