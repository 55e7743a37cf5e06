// Session thread handle
//
// Owns the event-loop thread and the runtime the session spawns its
// async work on. Collaborator callbacks are pushed through the handle
// from any thread; the loop drains them one at a time and wakes on a
// short interval to fire pending deadlines.

use super::controller::{NavigationSession, SessionConfig, SessionDeps, SessionEvent, SessionStatus};
use crate::location::{GeolocationError, GpsFix};
use crate::microphone::RecognitionErrorCode;
use crate::nav_constants::SESSION_POLL_INTERVAL_MS;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Errors from handle operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionHandleError {
    /// The session thread is no longer running
    #[error("Session thread is not running")]
    Disconnected,
    /// The session thread did not answer a status request in time
    #[error("Session thread did not reply in time")]
    Timeout,
}

/// Handle to the running session.
///
/// Dropping the handle shuts the session down and joins its thread.
pub struct SessionHandle {
    sender: Sender<SessionEvent>,
    thread: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Spawn the session thread.
    pub fn spawn(deps: SessionDeps, config: SessionConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        let loop_sender = sender.clone();
        let thread =
            std::thread::spawn(move || run_session_loop(deps, config, loop_sender, receiver));
        Self {
            sender,
            thread: Some(thread),
        }
    }

    fn send(&self, event: SessionEvent) -> Result<(), SessionHandleError> {
        self.sender
            .send(event)
            .map_err(|_| SessionHandleError::Disconnected)
    }

    /// Push one raw GPS fix.
    pub fn push_fix(&self, fix: GpsFix) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::Fix(fix))
    }

    /// Push a geolocation error event.
    pub fn push_geolocation_error(
        &self,
        error: GeolocationError,
    ) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::GeolocationError(error))
    }

    /// Push a recognition transcript.
    pub fn push_transcript(
        &self,
        text: impl Into<String>,
        is_final: bool,
    ) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::Transcript {
            text: text.into(),
            is_final,
        })
    }

    /// Push a recognition `end` event.
    pub fn push_recognition_ended(&self) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::RecognitionEnded)
    }

    /// Push a recognition `error` event.
    pub fn push_recognition_error(
        &self,
        code: RecognitionErrorCode,
    ) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::RecognitionError(code))
    }

    /// Push a user click or touch.
    pub fn push_user_gesture(&self) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::UserGesture)
    }

    /// Push an explicit microphone stop.
    pub fn push_manual_stop(&self) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::ManualStop)
    }

    /// Push a synthesis completion report.
    pub fn push_utterance_finished(&self, utterance_id: Uuid) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::UtteranceFinished { utterance_id })
    }

    /// Request one fresh, uncached position fix.
    pub fn request_fresh_position(&self) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::RequestFreshPosition)
    }

    /// Reset the session to its initial state.
    pub fn reset(&self) -> Result<(), SessionHandleError> {
        self.send(SessionEvent::Reset)
    }

    /// Fetch a point-in-time snapshot of the session.
    pub fn status(&self) -> Result<SessionStatus, SessionHandleError> {
        let (reply, response) = mpsc::channel();
        self.send(SessionEvent::Status(reply))?;
        response
            .recv_timeout(Duration::from_secs(1))
            .map_err(|_| SessionHandleError::Timeout)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        let _ = self.sender.send(SessionEvent::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                crate::error!("[session] Session thread panicked during shutdown");
            }
        }
    }
}

fn run_session_loop(
    deps: SessionDeps,
    config: SessionConfig,
    events_tx: Sender<SessionEvent>,
    receiver: Receiver<SessionEvent>,
) {
    // One worker is plenty: the runtime only carries routing and
    // geocoding calls whose results come straight back to this loop
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .thread_name("navigation-session-io")
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            crate::error!("[session] Failed to build session runtime: {}", error);
            return;
        }
    };

    let mut session = NavigationSession::new(deps, config, runtime.handle().clone(), events_tx);
    crate::info!("[session] Session loop started");

    let poll = Duration::from_millis(SESSION_POLL_INTERVAL_MS);
    loop {
        match receiver.recv_timeout(poll) {
            Ok(SessionEvent::Shutdown) => break,
            Ok(event) => session.handle_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        session.poll_timers(Instant::now());
    }

    crate::info!("[session] Session loop stopped");
}

#[cfg(test)]
#[path = "handle_test.rs"]
mod tests;
