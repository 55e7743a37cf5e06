// Announcement queue - serializes, dedupes, and sequences spoken output
//
// Multi-sentence announcements are explicit ordered segment lists; the
// queue dispatches one utterance at a time and waits for the sink's
// completion report (plus a small grace delay) before the next segment
// goes out. Urgent announcements cancel whatever is being spoken.

use super::synthesizer::{SpeechSynthesizer, Utterance};
use crate::nav_constants::{
    SPEECH_DEDUP_WINDOW_MS, SPEECH_LANG, SPEECH_PITCH, SPEECH_RATE, UTTERANCE_GRACE_DELAY_MS,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Whether an announcement may interrupt the current utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Queue behind whatever is speaking
    Normal,
    /// Cancel the current utterance and speak immediately; bypasses
    /// duplicate suppression
    Urgent,
}

/// Configuration for spoken output
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// BCP 47 language tag for all utterances
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    /// Window within which identical consecutive text is suppressed
    pub dedup_window: Duration,
    /// Delay after each completion before the next segment is dispatched
    pub grace_delay: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: SPEECH_LANG.to_string(),
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
            dedup_window: Duration::from_millis(SPEECH_DEDUP_WINDOW_MS),
            grace_delay: Duration::from_millis(UTTERANCE_GRACE_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
struct QueuedSegment {
    announcement_id: Uuid,
    text: String,
    urgent: bool,
    /// Completes the announcement when this segment finishes
    last_of_announcement: bool,
}

struct CurrentUtterance {
    utterance_id: Uuid,
    segment: QueuedSegment,
}

/// Serializes spoken output for the session.
///
/// Driven entirely by the session loop: completions arrive through
/// `on_utterance_finished`, time advances through `poll`. Nothing here
/// blocks or spawns.
pub struct AnnouncementQueue {
    synth: Arc<dyn SpeechSynthesizer>,
    config: SpeechConfig,
    queue: VecDeque<QueuedSegment>,
    current: Option<CurrentUtterance>,
    /// Text and dispatch time of the last spoken segment
    last_spoken: Option<(String, Instant)>,
    /// Set after a completion; the next dispatch waits until this passes
    grace_until: Option<Instant>,
    /// Announcements completed while enqueuing (their final segment was
    /// suppressed as a duplicate), reported on the next poll
    pending_completions: Vec<Uuid>,
}

impl AnnouncementQueue {
    /// Create a queue with default configuration
    pub fn new(synth: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::with_config(synth, SpeechConfig::default())
    }

    /// Create a queue with custom configuration
    pub fn with_config(synth: Arc<dyn SpeechSynthesizer>, config: SpeechConfig) -> Self {
        Self {
            synth,
            config,
            queue: VecDeque::new(),
            current: None,
            last_spoken: None,
            grace_until: None,
            pending_completions: Vec::new(),
        }
    }

    /// Whether an utterance is out at the sink right now
    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    /// When the session loop should poll next, if a grace delay is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.current.is_none() {
            self.grace_until
        } else {
            None
        }
    }

    /// Speak a single sentence.
    pub fn say(&mut self, text: impl Into<String>, priority: Priority, now: Instant) -> Uuid {
        self.announce(vec![text.into()], priority, now)
    }

    /// Speak an ordered list of sentences as one announcement.
    ///
    /// Returns the announcement id reported back when the last segment
    /// finishes. An announcement whose final segment is suppressed as a
    /// duplicate completes on the next poll instead.
    pub fn announce(&mut self, segments: Vec<String>, priority: Priority, now: Instant) -> Uuid {
        let announcement_id = Uuid::new_v4();
        let count = segments.len();
        let urgent = priority == Priority::Urgent;
        let queued = segments.into_iter().enumerate().map(|(i, text)| QueuedSegment {
            announcement_id,
            text,
            urgent,
            last_of_announcement: i + 1 == count,
        });

        if urgent {
            crate::debug!("[speech] Urgent announcement preempts current utterance");
            // Preempt: the cancelled utterance's completion report, if
            // any, no longer matches the current id and is ignored
            if self.current.take().is_some() {
                self.synth.cancel();
            }
            self.grace_until = None;
            for segment in queued.collect::<Vec<_>>().into_iter().rev() {
                self.queue.push_front(segment);
            }
        } else {
            self.queue.extend(queued);
        }

        let completed = self.dispatch_ready(now);
        self.pending_completions.extend(completed);
        announcement_id
    }

    /// Handle a completion report from the sink.
    ///
    /// Returns the ids of announcements completed by this report.
    /// Reports for cancelled or unknown utterances are ignored.
    pub fn on_utterance_finished(&mut self, utterance_id: Uuid, now: Instant) -> Vec<Uuid> {
        let current = match &self.current {
            Some(c) if c.utterance_id == utterance_id => self.current.take().unwrap(),
            _ => {
                crate::trace!("[speech] Ignoring completion for stale utterance {}", utterance_id);
                return vec![];
            }
        };

        self.grace_until = Some(now + self.config.grace_delay);
        if current.segment.last_of_announcement {
            vec![current.segment.announcement_id]
        } else {
            vec![]
        }
    }

    /// Advance time: dispatch the next segment once the grace delay has
    /// passed. Returns ids of announcements completed by duplicate
    /// suppression (their final segment was dropped, not spoken),
    /// including any held over from an enqueue.
    pub fn poll(&mut self, now: Instant) -> Vec<Uuid> {
        let mut completed = std::mem::take(&mut self.pending_completions);
        completed.extend(self.dispatch_ready(now));
        completed
    }

    fn dispatch_ready(&mut self, now: Instant) -> Vec<Uuid> {
        let mut completed = Vec::new();
        if self.current.is_some() {
            return completed;
        }
        if let Some(until) = self.grace_until {
            if now < until {
                return completed;
            }
            self.grace_until = None;
        }

        while let Some(segment) = self.queue.pop_front() {
            let duplicate = !segment.urgent
                && self
                    .last_spoken
                    .as_ref()
                    .map(|(text, at)| {
                        *text == segment.text
                            && now.duration_since(*at) < self.config.dedup_window
                    })
                    .unwrap_or(false);
            if duplicate {
                crate::debug!("[speech] Suppressing duplicate: {:?}", segment.text);
                if segment.last_of_announcement {
                    completed.push(segment.announcement_id);
                }
                continue;
            }

            let utterance = Utterance {
                id: Uuid::new_v4(),
                text: segment.text.clone(),
                lang: self.config.lang.clone(),
                rate: self.config.rate,
                pitch: self.config.pitch,
            };
            crate::info!("[speech] Speaking: {:?}", utterance.text);
            self.last_spoken = Some((segment.text.clone(), now));
            self.synth.speak(&utterance);
            self.current = Some(CurrentUtterance {
                utterance_id: utterance.id,
                segment,
            });
            break;
        }
        completed
    }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod tests;
