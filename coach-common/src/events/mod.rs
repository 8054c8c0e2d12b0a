//! Event types for the tutor event system
//!
//! Provides shared event definitions and the EventBus used to fan out
//! session changes and audio cues to whatever front end is attached.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Fire-and-forget sound cues requested by the tutorial state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    /// A scripted move was played on the board
    Hit,
    /// A tutorial was selected or restarted
    Success,
}

/// Tutor event types
///
/// Events are broadcast via EventBus and can be serialized for transmission
/// to a UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TutorEvent {
    /// Sound cue requested
    ///
    /// Triggers:
    /// - Audio: play the cue unless muted
    CueRequested {
        cue: AudioCue,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The step cursor or the selected tutorial changed
    ///
    /// Triggers:
    /// - UI: redraw board, instructions and progress bar
    StepChanged {
        tutorial_id: String,
        /// 0-based step index
        step_index: usize,
        total_steps: usize,
        /// FEN of the engine position after the change
        fen: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A step's scripted move could not be applied to the engine
    ///
    /// The step index still advanced; the engine position may differ from
    /// the step's own FEN until the next reload.
    IllegalScriptedMove {
        tutorial_id: String,
        step_index: usize,
        san: String,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Insight fetch started for the given generation
    InsightRequested {
        tutorial_id: String,
        step_index: usize,
        generation: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Insight for the current generation was stored
    InsightUpdated {
        tutorial_id: String,
        step_index: usize,
        generation: u64,
        /// True when the stored insight is a fallback payload
        degraded: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl TutorEvent {
    /// Convenience constructor for cue events
    pub fn cue(cue: AudioCue) -> Self {
        TutorEvent::CueRequested {
            cue,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Event type name, as used in the serialized `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            TutorEvent::CueRequested { .. } => "CueRequested",
            TutorEvent::StepChanged { .. } => "StepChanged",
            TutorEvent::IllegalScriptedMove { .. } => "IllegalScriptedMove",
            TutorEvent::InsightRequested { .. } => "InsightRequested",
            TutorEvent::InsightUpdated { .. } => "InsightUpdated",
        }
    }
}

/// Central event distribution bus
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<TutorEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    ///
    /// # Examples
    ///
    /// ```
    /// use coach_common::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.capacity(), 100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<TutorEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: TutorEvent,
    ) -> Result<usize, broadcast::error::SendError<TutorEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: TutorEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
