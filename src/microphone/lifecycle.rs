// Microphone lifecycle state machine
//
// One transition function owns every state change. Timers are
// cooperative: scheduling and cancellation are expressed as actions for
// the caller, and the elapsed events re-validate state here before
// anything happens, so a timeout firing after the state already moved
// on is a no-op. The one hard invariant: recognition is never
// auto-restarted while navigating; only an explicit Activate reopens
// the microphone mid-journey.

use super::recognizer::RecognitionErrorCode;
use serde::Serialize;

/// Lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MicrophoneState {
    /// Fresh session, microphone never opened
    Idle,
    /// Recognition open, awaiting commands
    Listening,
    /// Destination resolved; awaiting "mulai" or a new destination
    WaitingForConfirmation,
    /// Deliberately silenced (manual stop, timeout, or navigation start)
    Stopped,
}

impl Default for MicrophoneState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Inputs to the transition function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MicEvent {
    /// Spoken activation phrase
    Activate,
    /// A destination was resolved; open the confirmation window
    DestinationResolved,
    /// Navigation confirmed; silence the microphone for the journey
    StartNavigation,
    /// The confirmation window timer fired
    ConfirmationTimeout,
    /// The auto-restart delay timer fired
    RestartDelayElapsed,
    /// Recognition reported `end`
    RecognitionEnded,
    /// Recognition reported `error`
    RecognitionError(RecognitionErrorCode),
    /// The user clicked or touched the page
    UserGesture,
    /// Explicit stop from the UI
    ManualStop,
    /// Full session reset
    Reset,
}

/// Side effects for the caller to execute, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicAction {
    /// Start the recognition collaborator
    StartRecognition,
    /// Stop the recognition collaborator
    StopRecognition,
    /// Arm the confirmation window timer
    ScheduleConfirmationTimeout,
    /// Disarm the confirmation window timer
    CancelConfirmationTimeout,
    /// Arm the delayed auto-restart timer
    ScheduleRestart,
    /// Disarm the delayed auto-restart timer
    CancelRestart,
}

/// The microphone lifecycle state record.
///
/// All flags that used to live as ad hoc properties on the recognition
/// handle are explicit typed fields here.
#[derive(Debug, Default)]
pub struct MicrophoneLifecycle {
    state: MicrophoneState,
    /// Turn-by-turn guidance is active; blocks every auto-restart
    is_navigating: bool,
    /// Permission was denied; only a user gesture may reopen
    awaiting_user_gesture: bool,
    /// The user stopped the microphone on purpose
    manually_stopped: bool,
    /// An auto-restart is armed and must be re-validated on fire
    restart_pending: bool,
}

impl MicrophoneLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MicrophoneState {
        self.state
    }

    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }

    pub fn awaiting_user_gesture(&self) -> bool {
        self.awaiting_user_gesture
    }

    /// Apply one event and return the side effects to execute.
    pub fn apply(&mut self, event: MicEvent) -> Vec<MicAction> {
        let before = self.state;
        let actions = self.transition(event);
        if self.state != before {
            crate::info!("[microphone] {:?} -> {:?}", before, self.state);
        }
        actions
    }

    fn transition(&mut self, event: MicEvent) -> Vec<MicAction> {
        match event {
            MicEvent::Activate => {
                if self.awaiting_user_gesture {
                    crate::warn!("[microphone] Activation blocked, awaiting user gesture");
                    return vec![];
                }
                match self.state {
                    MicrophoneState::Idle | MicrophoneState::Stopped => {
                        self.state = MicrophoneState::Listening;
                        self.manually_stopped = false;
                        self.restart_pending = false;
                        vec![MicAction::StartRecognition]
                    }
                    // Already open
                    MicrophoneState::Listening | MicrophoneState::WaitingForConfirmation => vec![],
                }
            }

            MicEvent::DestinationResolved => match self.state {
                MicrophoneState::Listening | MicrophoneState::WaitingForConfirmation => {
                    self.state = MicrophoneState::WaitingForConfirmation;
                    // A new destination terminates any active guidance
                    self.is_navigating = false;
                    vec![
                        MicAction::StartRecognition,
                        MicAction::ScheduleConfirmationTimeout,
                    ]
                }
                _ => vec![],
            },

            MicEvent::StartNavigation => match self.state {
                MicrophoneState::Listening | MicrophoneState::WaitingForConfirmation => {
                    self.state = MicrophoneState::Stopped;
                    self.is_navigating = true;
                    self.restart_pending = false;
                    vec![
                        MicAction::CancelConfirmationTimeout,
                        MicAction::CancelRestart,
                        MicAction::StopRecognition,
                    ]
                }
                _ => vec![],
            },

            MicEvent::ConfirmationTimeout => {
                // Stale timers re-validate here: a timeout that fires
                // after StartNavigation already moved the state is a no-op
                if self.state == MicrophoneState::WaitingForConfirmation {
                    crate::info!("[microphone] Confirmation window elapsed");
                    self.state = MicrophoneState::Stopped;
                    vec![MicAction::StopRecognition]
                } else {
                    vec![]
                }
            }

            MicEvent::RestartDelayElapsed => {
                let armed = self.restart_pending;
                self.restart_pending = false;
                if armed
                    && self.state == MicrophoneState::Listening
                    && !self.manually_stopped
                    && !self.is_navigating
                    && !self.awaiting_user_gesture
                {
                    vec![MicAction::StartRecognition]
                } else {
                    vec![]
                }
            }

            MicEvent::RecognitionEnded => match self.state {
                MicrophoneState::Listening
                    if !self.manually_stopped && !self.is_navigating =>
                {
                    crate::debug!("[microphone] Unexpected end, scheduling restart");
                    self.restart_pending = true;
                    vec![MicAction::ScheduleRestart]
                }
                // The confirmation window keeps the microphone open
                MicrophoneState::WaitingForConfirmation => vec![MicAction::StartRecognition],
                _ => vec![],
            },

            MicEvent::RecognitionError(code) => {
                if code.is_transient() {
                    crate::debug!("[microphone] Ignoring transient error {:?}", code);
                    return vec![];
                }
                match code {
                    RecognitionErrorCode::PermissionDenied => {
                        crate::warn!("[microphone] Permission denied, waiting for user gesture");
                        self.state = MicrophoneState::Stopped;
                        self.awaiting_user_gesture = true;
                        self.restart_pending = false;
                        vec![
                            MicAction::CancelConfirmationTimeout,
                            MicAction::CancelRestart,
                            MicAction::StopRecognition,
                        ]
                    }
                    other => {
                        crate::warn!("[microphone] Recognition error {:?}", other);
                        vec![]
                    }
                }
            }

            MicEvent::UserGesture => {
                if self.awaiting_user_gesture {
                    self.awaiting_user_gesture = false;
                    self.state = MicrophoneState::Listening;
                    vec![MicAction::StartRecognition]
                } else {
                    vec![]
                }
            }

            MicEvent::ManualStop => {
                self.manually_stopped = true;
                self.restart_pending = false;
                let was_open = matches!(
                    self.state,
                    MicrophoneState::Listening | MicrophoneState::WaitingForConfirmation
                );
                self.state = MicrophoneState::Stopped;
                if was_open {
                    vec![
                        MicAction::CancelConfirmationTimeout,
                        MicAction::CancelRestart,
                        MicAction::StopRecognition,
                    ]
                } else {
                    vec![]
                }
            }

            MicEvent::Reset => {
                *self = Self::default();
                vec![
                    MicAction::CancelConfirmationTimeout,
                    MicAction::CancelRestart,
                    MicAction::StopRecognition,
                ]
            }
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod tests;
