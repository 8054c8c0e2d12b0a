//! Sound cue playback
//!
//! The session emits [`TutorEvent::CueRequested`] on the event bus. A player
//! task subscribes, checks the shared mute flag and hands each cue to a sink.
//! The terminal front end uses the bell; tests pass a recording closure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use coach_common::events::{AudioCue, EventBus, TutorEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shared mute state for cue playback
#[derive(Debug, Default)]
pub struct AudioCues {
    muted: AtomicBool,
}

impl AudioCues {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.muted.fetch_xor(true, Ordering::Relaxed);
        info!("Sound {}", if muted { "muted" } else { "unmuted" });
        muted
    }

    /// Spawn a task that plays every requested cue through `sink`
    ///
    /// The task ends when the event bus closes.
    pub fn spawn_player<F>(self: &Arc<Self>, events: &EventBus, sink: F) -> JoinHandle<()>
    where
        F: Fn(AudioCue) + Send + 'static,
    {
        let cues = Arc::clone(self);
        let mut rx = events.subscribe();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(TutorEvent::CueRequested { cue, .. }) => {
                        if cues.is_muted() {
                            debug!(?cue, "Cue suppressed while muted");
                        } else {
                            sink(cue);
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Cue player lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

/// Sink that rings the terminal bell
pub fn terminal_bell(cue: AudioCue) {
    use std::io::Write;

    // Success gets a double ring
    let bell = match cue {
        AudioCue::Hit => "\x07",
        AudioCue::Success => "\x07\x07",
    };
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(bell.as_bytes()).and_then(|_| stdout.flush()) {
        debug!("Could not ring terminal bell: {}", e);
    }
}
