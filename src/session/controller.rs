// Navigation session controller
//
// Single owner of all mutable navigation state. Every collaborator
// callback arrives as a SessionEvent and is handled here one at a time,
// so GPS fixes, routing callbacks, transcripts, and timer fires never
// race. Async work (routing, geocoding) is spawned on the runtime and
// reports back through the same channel tagged with a request id;
// results for anything but the latest request are dropped.

use crate::events::{
    current_timestamp, AnnouncementCompletedPayload, DestinationResolvedPayload,
    InstructionsUpdatedPayload, MicrophoneStateChangedPayload, NavigationEventEmitter,
    NavigationStartedPayload, PositionRejectedPayload, PositionUpdatedPayload, RouteErrorPayload,
    RouteFoundPayload, RouteSlotSavedPayload,
};
use crate::geo::LatLng;
use crate::guidance::{GuidanceConfig, InstructionTracker};
use crate::location::{
    FixAssessment, GeolocationError, GeolocationProvider, GpsFix, LocationFilter,
    LocationFilterConfig,
};
use crate::microphone::{
    MicAction, MicEvent, MicrophoneLifecycle, MicrophoneState, RecognitionErrorCode,
    SpeechRecognizer,
};
use crate::nav_constants::{CONFIRMATION_TIMEOUT_MS, RECOGNITION_RESTART_DELAY_MS};
use crate::route_store::{NamedLocation, NamedRouteSlot, RouteStore};
use crate::routing::{
    RecomputePlan, RouteEngine, RouteEngineConfig, RouteOutcome, RouteResponse, RoutingBackend,
    RoutingError,
};
use crate::speech::{AnnouncementQueue, Priority, SpeechConfig, SpeechSynthesizer};
use crate::voice::{
    CommandInterpreter, CommandParseError, DestinationResolver, GeocodeError, ResolvedDestination,
    VoiceCommand,
};
use futures_util::future::try_join;
use serde::Serialize;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

const PERMISSION_PROMPT: &str =
    "Izin mikrofon ditolak. Sentuh layar untuk mengaktifkan kembali";

/// One input to the session loop
pub enum SessionEvent {
    /// Raw GPS sample from the geolocation collaborator
    Fix(GpsFix),
    /// Error event from the geolocation collaborator; logged only
    GeolocationError(GeolocationError),
    /// Recognition transcript; only final transcripts are interpreted
    Transcript { text: String, is_final: bool },
    /// Recognition reported `end`
    RecognitionEnded,
    /// Recognition reported `error`
    RecognitionError(RecognitionErrorCode),
    /// The user clicked or touched the page
    UserGesture,
    /// Explicit microphone stop from the UI
    ManualStop,
    /// The UI requested one fresh, uncached fix
    RequestFreshPosition,
    /// Routing backend result for a tagged request
    RouteResult {
        request_id: u64,
        result: Result<RouteResponse, RoutingError>,
    },
    /// Destination resolution result for a tagged request
    DestinationResult {
        request_id: u64,
        query: String,
        result: Result<ResolvedDestination, GeocodeError>,
    },
    /// Endpoint resolution result for a create-route command
    SlotEndpointsResult {
        request_id: u64,
        slot: u8,
        from: String,
        to: String,
        result: Result<(ResolvedDestination, ResolvedDestination), GeocodeError>,
    },
    /// Completion report from the synthesis sink
    UtteranceFinished { utterance_id: Uuid },
    /// Snapshot request, answered on the given channel
    Status(Sender<SessionStatus>),
    /// Full session reset
    Reset,
    /// Stop the event loop
    Shutdown,
}

/// Configuration for the whole session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub location: LocationFilterConfig,
    pub engine: RouteEngineConfig,
    pub guidance: GuidanceConfig,
    pub speech: SpeechConfig,
    /// Confirmation window after a destination resolves
    pub confirmation_timeout: Duration,
    /// Delay before an auto-restart of recognition
    pub restart_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            location: LocationFilterConfig::default(),
            engine: RouteEngineConfig::default(),
            guidance: GuidanceConfig::default(),
            speech: SpeechConfig::default(),
            confirmation_timeout: Duration::from_millis(CONFIRMATION_TIMEOUT_MS),
            restart_delay: Duration::from_millis(RECOGNITION_RESTART_DELAY_MS),
        }
    }
}

/// Collaborators handed to the session at startup
pub struct SessionDeps {
    pub routing: Arc<dyn RoutingBackend>,
    pub resolver: DestinationResolver,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub store: Box<dyn RouteStore>,
    pub emitter: Arc<dyn NavigationEventEmitter>,
    /// Optional: only needed when fresh-fix requests should reach a
    /// real provider
    pub geolocation: Option<Arc<dyn GeolocationProvider>>,
}

/// Summary of the active route for status snapshots
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_secs: f64,
    pub instruction_count: usize,
    pub route_hash: u64,
}

/// Point-in-time snapshot of the session
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub microphone: MicrophoneState,
    pub is_navigating: bool,
    pub position: Option<LatLng>,
    pub low_confidence: bool,
    /// Display name of the resolved destination, if any
    pub destination: Option<String>,
    pub route: Option<RouteSummary>,
    pub distance_traveled_m: Option<f64>,
    pub remaining_m: Option<f64>,
}

/// The session controller.
///
/// Runs on the session thread; never locked, never shared. Timers are
/// plain deadlines checked by `poll_timers`, and every timer fire goes
/// back through the microphone lifecycle so a stale fire is a no-op.
pub struct NavigationSession {
    config: SessionConfig,
    filter: LocationFilter,
    engine: RouteEngine,
    tracker: InstructionTracker,
    mic: MicrophoneLifecycle,
    queue: AnnouncementQueue,
    interpreter: CommandInterpreter,
    resolver: Arc<DestinationResolver>,
    routing: Arc<dyn RoutingBackend>,
    recognizer: Arc<dyn SpeechRecognizer>,
    store: Box<dyn RouteStore>,
    emitter: Arc<dyn NavigationEventEmitter>,
    geolocation: Option<Arc<dyn GeolocationProvider>>,
    rt: tokio::runtime::Handle,
    events_tx: Sender<SessionEvent>,
    /// The resolved destination driving route recomputation
    destination: Option<ResolvedDestination>,
    /// Id of the latest resolution request; older results are dropped
    pending_resolution: Option<u64>,
    next_resolution_id: u64,
    /// (traveled, remaining) from the latest progress update
    last_progress: Option<(f64, f64)>,
    confirmation_deadline: Option<Instant>,
    restart_deadline: Option<Instant>,
}

impl NavigationSession {
    pub fn new(
        deps: SessionDeps,
        config: SessionConfig,
        rt: tokio::runtime::Handle,
        events_tx: Sender<SessionEvent>,
    ) -> Self {
        Self {
            filter: LocationFilter::with_config(config.location.clone()),
            engine: RouteEngine::with_config(config.engine.clone()),
            tracker: InstructionTracker::with_config(config.guidance.clone()),
            mic: MicrophoneLifecycle::new(),
            queue: AnnouncementQueue::with_config(deps.synthesizer, config.speech.clone()),
            interpreter: CommandInterpreter::new(),
            resolver: Arc::new(deps.resolver),
            routing: deps.routing,
            recognizer: deps.recognizer,
            store: deps.store,
            emitter: deps.emitter,
            geolocation: deps.geolocation,
            rt,
            events_tx,
            config,
            destination: None,
            pending_resolution: None,
            next_resolution_id: 0,
            last_progress: None,
            confirmation_deadline: None,
            restart_deadline: None,
        }
    }

    /// Handle one event. Shutdown is the loop's concern, not ours.
    pub fn handle_event(&mut self, event: SessionEvent) {
        let now = Instant::now();
        match event {
            SessionEvent::Fix(fix) => self.on_fix(fix, now),
            SessionEvent::GeolocationError(error) => {
                crate::warn!(
                    "[session] Geolocation error {}: {}",
                    error.code,
                    error.message
                );
            }
            SessionEvent::Transcript { text, is_final } => {
                self.on_transcript(&text, is_final, now)
            }
            SessionEvent::RecognitionEnded => self.apply_mic(MicEvent::RecognitionEnded, now),
            SessionEvent::RecognitionError(code) => {
                let denied = code == RecognitionErrorCode::PermissionDenied;
                self.apply_mic(MicEvent::RecognitionError(code), now);
                if denied {
                    self.queue.say(PERMISSION_PROMPT, Priority::Normal, now);
                }
            }
            SessionEvent::UserGesture => self.apply_mic(MicEvent::UserGesture, now),
            SessionEvent::ManualStop => self.apply_mic(MicEvent::ManualStop, now),
            SessionEvent::RequestFreshPosition => {
                self.filter.request_fresh();
                if let Some(provider) = &self.geolocation {
                    provider.request_fresh_fix();
                }
            }
            SessionEvent::RouteResult { request_id, result } => {
                self.on_route_result(request_id, result, now)
            }
            SessionEvent::DestinationResult {
                request_id,
                query,
                result,
            } => self.on_destination_result(request_id, query, result, now),
            SessionEvent::SlotEndpointsResult {
                request_id,
                slot,
                from,
                to,
                result,
            } => self.on_slot_endpoints(request_id, slot, from, to, result, now),
            SessionEvent::UtteranceFinished { utterance_id } => {
                for announcement_id in self.queue.on_utterance_finished(utterance_id, now) {
                    self.emitter.emit_announcement_completed(AnnouncementCompletedPayload {
                        announcement_id,
                    });
                }
            }
            SessionEvent::Status(reply) => {
                let _ = reply.send(self.status());
            }
            SessionEvent::Reset => self.reset(now),
            SessionEvent::Shutdown => {}
        }
    }

    /// Fire any elapsed deadlines and advance the announcement queue.
    pub fn poll_timers(&mut self, now: Instant) {
        if let Some(deadline) = self.confirmation_deadline {
            if now >= deadline {
                self.confirmation_deadline = None;
                self.apply_mic(MicEvent::ConfirmationTimeout, now);
            }
        }
        if let Some(deadline) = self.restart_deadline {
            if now >= deadline {
                self.restart_deadline = None;
                self.apply_mic(MicEvent::RestartDelayElapsed, now);
            }
        }
        for announcement_id in self.queue.poll(now) {
            self.emitter
                .emit_announcement_completed(AnnouncementCompletedPayload { announcement_id });
        }
    }

    /// Point-in-time snapshot
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            microphone: self.mic.state(),
            is_navigating: self.mic.is_navigating(),
            position: self.filter.effective_position(),
            low_confidence: self.filter.is_low_confidence(),
            destination: self.destination.as_ref().map(|d| d.display_name.clone()),
            route: self.engine.route().map(|r| RouteSummary {
                total_distance_m: r.total_distance_m,
                total_time_secs: r.total_time_secs,
                instruction_count: r.instructions.len(),
                route_hash: r.hash,
            }),
            distance_traveled_m: self.last_progress.map(|(traveled, _)| traveled),
            remaining_m: self.last_progress.map(|(_, remaining)| remaining),
        }
    }

    // -------------------------------------------------------------------------
    // Position
    // -------------------------------------------------------------------------

    fn on_fix(&mut self, fix: GpsFix, now: Instant) {
        let accuracy_m = fix.accuracy_m;
        let timestamp = fix.timestamp.to_rfc3339();
        match self.filter.ingest(fix) {
            FixAssessment::Rejected(reason) => {
                crate::trace!("[session] Fix rejected: {:?}", reason);
                self.emitter
                    .emit_position_rejected(PositionRejectedPayload { reason, accuracy_m });
            }
            FixAssessment::Accepted { position_changed }
            | FixAssessment::AcceptedLowConfidence { position_changed } => {
                if !position_changed {
                    return;
                }
                if let Some(position) = self.filter.effective_position() {
                    self.emitter.emit_position_updated(PositionUpdatedPayload {
                        position,
                        accuracy_m,
                        low_confidence: self.filter.is_low_confidence(),
                        timestamp,
                    });
                    self.on_position_changed(position, now);
                }
            }
        }
    }

    fn on_position_changed(&mut self, position: LatLng, now: Instant) {
        // Progress against the current geometry first; a start-only
        // recompute leaves that geometry in place anyway
        self.track_progress(position, now);
        if let Some(destination) = self.destination.as_ref().map(|d| d.position) {
            self.request_route(position, destination);
        }
    }

    fn track_progress(&mut self, position: LatLng, now: Instant) {
        let Some(route) = self.engine.route_mut() else {
            return;
        };
        let Some(update) = self.tracker.on_position(route, position) else {
            return;
        };
        self.last_progress = Some((
            update.distance_traveled_m,
            update.remaining_to_destination_m,
        ));
        if !update.retired.is_empty() || !update.announcements.is_empty() {
            self.emitter
                .emit_instructions_updated(InstructionsUpdatedPayload {
                    distance_traveled_m: update.distance_traveled_m,
                    remaining_m: update.remaining_to_destination_m,
                    retired: update.retired,
                });
        }
        for phrase in update.announcements {
            // Immediate maneuver phrases interrupt whatever is speaking
            let priority = if phrase.ends_with(" now") {
                Priority::Urgent
            } else {
                Priority::Normal
            };
            self.queue.say(phrase, priority, now);
        }
    }

    // -------------------------------------------------------------------------
    // Voice commands
    // -------------------------------------------------------------------------

    fn on_transcript(&mut self, text: &str, is_final: bool, now: Instant) {
        if !is_final {
            crate::trace!("[session] Interim transcript ignored: {:?}", text);
            return;
        }

        let command = match self.interpreter.interpret(text) {
            Ok(command) => command,
            Err(CommandParseError::SlotOutOfRange(n)) => {
                crate::warn!("[session] Spoken route slot {} out of range", n);
                self.queue.say(
                    "Nomor rute harus antara satu dan enam",
                    Priority::Normal,
                    now,
                );
                return;
            }
        };

        let mic_open = matches!(
            self.mic.state(),
            MicrophoneState::Listening | MicrophoneState::WaitingForConfirmation
        );

        match command {
            VoiceCommand::Activate => {
                let was_open = mic_open;
                self.apply_mic(MicEvent::Activate, now);
                if self.mic.awaiting_user_gesture() {
                    self.queue.say(PERMISSION_PROMPT, Priority::Normal, now);
                } else if !was_open && self.mic.state() == MicrophoneState::Listening {
                    self.queue.say("Ya, saya mendengarkan", Priority::Normal, now);
                }
            }
            // A late transcript after the microphone was silenced
            _ if !mic_open => {
                crate::debug!("[session] Dropping command while microphone closed: {:?}", text);
            }
            VoiceCommand::StartNavigation => self.start_navigation(now),
            VoiceCommand::SelectRoute { slot } => self.select_route(slot, now),
            VoiceCommand::CreateRoute { slot, from, to } => {
                self.spawn_slot_resolution(slot, from, to, now)
            }
            VoiceCommand::SetDestination { query } => {
                self.queue
                    .say(format!("Mencari {}", query), Priority::Normal, now);
                self.spawn_destination_resolution(query);
            }
            VoiceCommand::Unknown { .. } => {
                self.queue
                    .say("Maaf, saya tidak mengerti", Priority::Normal, now);
            }
        }
    }

    fn start_navigation(&mut self, now: Instant) {
        if self.engine.route().is_none() {
            self.queue.say(
                "Belum ada rute. Sebutkan tujuan terlebih dahulu",
                Priority::Normal,
                now,
            );
            return;
        }
        if self.filter.effective_position().is_none() {
            self.queue.say(
                "Posisi belum diketahui. Tunggu sinyal GPS",
                Priority::Normal,
                now,
            );
            return;
        }

        self.apply_mic(MicEvent::StartNavigation, now);
        let destination = self
            .destination
            .as_ref()
            .map(|d| d.display_name.clone())
            .unwrap_or_else(|| "tujuan".to_string());
        crate::info!("[session] Navigation started to {:?}", destination);
        self.emitter.emit_navigation_started(NavigationStartedPayload {
            destination,
            timestamp: current_timestamp(),
        });
        self.queue.say("Navigasi dimulai", Priority::Normal, now);
    }

    fn select_route(&mut self, slot: u8, now: Instant) {
        let stored = match self.store.get(slot) {
            Ok(stored) => stored,
            Err(error) => {
                crate::error!("[session] Route slot {} read failed: {}", slot, error);
                return;
            }
        };
        let Some(stored) = stored else {
            self.queue
                .say(format!("Rute {} belum diatur", slot), Priority::Normal, now);
            return;
        };
        let (Some(start), Some(end)) = (stored.start.clone(), stored.end.clone()) else {
            self.queue
                .say(format!("Rute {} belum lengkap", slot), Priority::Normal, now);
            return;
        };

        crate::info!("[session] Loading route slot {}: {}", slot, stored.name);
        self.queue
            .say(format!("Memuat rute {}", stored.name), Priority::Normal, now);
        self.destination = Some(ResolvedDestination {
            position: end.point,
            display_name: end.name,
            from_gazetteer: true,
        });
        self.apply_mic(MicEvent::DestinationResolved, now);
        // The stored origin is the route start even when it differs from
        // the current position; the start waypoint converges on the next fix
        self.request_route(start.point, end.point);
    }

    // -------------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------------

    fn request_route(&mut self, start: LatLng, end: LatLng) {
        let plan = self.engine.plan_recompute(start, end);
        if matches!(plan, RecomputePlan::FullRebuild { .. }) {
            self.last_progress = None;
        }
        if let Some(request_id) = plan.request_id() {
            self.spawn_route_request(request_id, [start, end]);
        }
    }

    fn spawn_route_request(&self, request_id: u64, waypoints: [LatLng; 2]) {
        let backend = Arc::clone(&self.routing);
        let tx = self.events_tx.clone();
        self.rt.spawn(async move {
            let result = backend.compute_route(waypoints).await;
            let _ = tx.send(SessionEvent::RouteResult { request_id, result });
        });
    }

    fn on_route_result(
        &mut self,
        request_id: u64,
        result: Result<RouteResponse, RoutingError>,
        now: Instant,
    ) {
        match result {
            Ok(response) => match self.engine.handle_response(request_id, response, now) {
                RouteOutcome::New { announce } => {
                    if let Some(route) = self.engine.route() {
                        self.emitter.emit_route_found(RouteFoundPayload {
                            total_distance_m: route.total_distance_m,
                            total_time_secs: route.total_time_secs,
                            instruction_count: route.instructions.len(),
                            route_hash: route.hash,
                        });
                        if announce {
                            let minutes = (route.total_time_secs / 60.0).round().max(1.0) as i64;
                            let segments = vec![
                                "Rute ditemukan".to_string(),
                                format!("Jarak {}", format_distance(route.total_distance_m)),
                                format!("Perkiraan waktu {} menit", minutes),
                                "Katakan mulai untuk memulai navigasi".to_string(),
                            ];
                            self.queue.announce(segments, Priority::Normal, now);
                        }
                    }
                    // Progress restarts against the new geometry
                    if let Some(position) = self.filter.effective_position() {
                        self.track_progress(position, now);
                    }
                }
                RouteOutcome::Duplicate | RouteOutcome::Superseded => {}
            },
            Err(error) => {
                if self.engine.handle_failure(request_id) {
                    // No automatic retry; the user must restate a destination
                    self.destination = None;
                    self.last_progress = None;
                    self.emitter.emit_route_error(RouteErrorPayload {
                        message: error.to_string(),
                    });
                    self.queue.announce(
                        vec![
                            "Rute tidak dapat ditemukan".to_string(),
                            "Silakan sebutkan tujuan lain".to_string(),
                        ],
                        Priority::Normal,
                        now,
                    );
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Destination resolution
    // -------------------------------------------------------------------------

    fn spawn_destination_resolution(&mut self, query: String) {
        self.next_resolution_id += 1;
        let request_id = self.next_resolution_id;
        self.pending_resolution = Some(request_id);
        crate::info!(
            "[session] Resolving destination {:?} (request {})",
            query,
            request_id
        );
        let resolver = Arc::clone(&self.resolver);
        let tx = self.events_tx.clone();
        self.rt.spawn(async move {
            let result = resolver.resolve(&query).await;
            let _ = tx.send(SessionEvent::DestinationResult {
                request_id,
                query,
                result,
            });
        });
    }

    fn spawn_slot_resolution(&mut self, slot: u8, from: String, to: String, now: Instant) {
        self.queue
            .say(format!("Menyimpan rute {}", slot), Priority::Normal, now);
        self.next_resolution_id += 1;
        let request_id = self.next_resolution_id;
        self.pending_resolution = Some(request_id);
        let resolver = Arc::clone(&self.resolver);
        let tx = self.events_tx.clone();
        self.rt.spawn(async move {
            let result = try_join(resolver.resolve(&from), resolver.resolve(&to)).await;
            let _ = tx.send(SessionEvent::SlotEndpointsResult {
                request_id,
                slot,
                from,
                to,
                result,
            });
        });
    }

    fn on_destination_result(
        &mut self,
        request_id: u64,
        query: String,
        result: Result<ResolvedDestination, GeocodeError>,
        now: Instant,
    ) {
        if self.pending_resolution != Some(request_id) {
            crate::debug!("[session] Dropping stale resolution result (request {})", request_id);
            return;
        }
        self.pending_resolution = None;

        match result {
            Ok(resolved) => {
                crate::info!(
                    "[session] Destination {:?} -> {:?}",
                    query,
                    resolved.display_name
                );
                self.emitter.emit_destination_resolved(DestinationResolvedPayload {
                    query,
                    display_name: resolved.display_name.clone(),
                    position: resolved.position,
                    from_gazetteer: resolved.from_gazetteer,
                });
                self.queue.announce(
                    vec![
                        format!("Tujuan ditemukan: {}", resolved.display_name),
                        "Katakan mulai untuk memulai navigasi".to_string(),
                    ],
                    Priority::Normal,
                    now,
                );
                let destination = resolved.position;
                self.destination = Some(resolved);
                self.apply_mic(MicEvent::DestinationResolved, now);
                if let Some(position) = self.filter.effective_position() {
                    self.request_route(position, destination);
                }
            }
            Err(error) => self.speak_geocode_failure(&error, now),
        }
    }

    fn on_slot_endpoints(
        &mut self,
        request_id: u64,
        slot: u8,
        from: String,
        to: String,
        result: Result<(ResolvedDestination, ResolvedDestination), GeocodeError>,
        now: Instant,
    ) {
        if self.pending_resolution != Some(request_id) {
            crate::debug!("[session] Dropping stale resolution result (request {})", request_id);
            return;
        }
        self.pending_resolution = None;

        match result {
            Ok((origin, destination)) => {
                let name = format!("{} - {}", origin.display_name, destination.display_name);
                let record = NamedRouteSlot {
                    id: slot,
                    name: name.clone(),
                    start: Some(NamedLocation {
                        name: origin.display_name,
                        point: origin.position,
                    }),
                    end: Some(NamedLocation {
                        name: destination.display_name,
                        point: destination.position,
                    }),
                };
                match self.store.set(record) {
                    Ok(()) => {
                        crate::info!("[session] Route slot {} saved: {}", slot, name);
                        self.emitter
                            .emit_route_slot_saved(RouteSlotSavedPayload { slot, name });
                        self.queue.say(
                            format!("Rute {} disimpan: {} ke {}", slot, from, to),
                            Priority::Normal,
                            now,
                        );
                    }
                    Err(error) => {
                        crate::error!(
                            "[session] Failed to persist route slot {}: {}",
                            slot,
                            error
                        );
                        self.queue
                            .say("Gagal menyimpan rute", Priority::Normal, now);
                    }
                }
            }
            Err(error) => self.speak_geocode_failure(&error, now),
        }
    }

    fn speak_geocode_failure(&mut self, error: &GeocodeError, now: Instant) {
        crate::warn!("[session] Destination resolution failed: {}", error);
        let text = match error {
            GeocodeError::NotFound => "Lokasi tidak ditemukan. Silakan sebutkan nama lain",
            GeocodeError::RateLimited | GeocodeError::Service(_) => {
                "Layanan pencarian lokasi sedang bermasalah. Coba lagi nanti"
            }
        };
        self.queue.say(text, Priority::Normal, now);
    }

    // -------------------------------------------------------------------------
    // Microphone
    // -------------------------------------------------------------------------

    /// Apply one lifecycle event, execute its actions, and emit a state
    /// change when anything observable moved.
    fn apply_mic(&mut self, event: MicEvent, now: Instant) {
        let before = (
            self.mic.state(),
            self.mic.is_navigating(),
            self.mic.awaiting_user_gesture(),
        );
        for action in self.mic.apply(event) {
            match action {
                MicAction::StartRecognition => self.recognizer.start(),
                MicAction::StopRecognition => self.recognizer.stop(),
                MicAction::ScheduleConfirmationTimeout => {
                    self.confirmation_deadline = Some(now + self.config.confirmation_timeout);
                }
                MicAction::CancelConfirmationTimeout => self.confirmation_deadline = None,
                MicAction::ScheduleRestart => {
                    self.restart_deadline = Some(now + self.config.restart_delay);
                }
                MicAction::CancelRestart => self.restart_deadline = None,
            }
        }
        let after = (
            self.mic.state(),
            self.mic.is_navigating(),
            self.mic.awaiting_user_gesture(),
        );
        if after != before {
            self.emitter
                .emit_microphone_state_changed(MicrophoneStateChangedPayload {
                    state: self.mic.state(),
                    is_navigating: self.mic.is_navigating(),
                    awaiting_user_gesture: self.mic.awaiting_user_gesture(),
                });
        }
    }

    fn reset(&mut self, now: Instant) {
        crate::info!("[session] Session reset");
        self.engine.clear();
        self.destination = None;
        self.pending_resolution = None;
        self.last_progress = None;
        self.apply_mic(MicEvent::Reset, now);
    }
}

/// Spoken distance, meters below a kilometer
fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} kilometer", meters / 1000.0)
    } else {
        format!("{} meter", meters.round() as i64)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
