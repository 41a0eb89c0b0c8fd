//! Playback controller - the Idle / Playing state machine
//!
//! Transitions:
//! - Idle → Playing(key): select a sound
//! - Playing(key) → Idle: select the same sound again, `stop`, or natural end
//! - Playing(key) → Playing(other): select another sound; the source is replaced

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::AudioOutput,
    types::{progress_percent, PlaybackState},
};
use tracing::{debug, info, warn};

/// Owner of the one audio output
///
/// Every play/stop request goes through here, so the output never holds a source
/// the controller doesn't know about.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    state: PlaybackState,
    progress: f64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create an idle controller that owns `output`
    pub fn new(output: O) -> Self {
        Self {
            output,
            state: PlaybackState::Idle,
            progress: 0.0,
            pending_events: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Key of the playing sound
    pub fn current_key(&self) -> Option<&str> {
        self.state.playing_key()
    }

    /// Progress of the playing sound in percent (0 when idle)
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Read-only access to the output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Select a sound
    ///
    /// Starts `key` from the beginning, or stops it if it is the one already
    /// playing. Selecting a different sound replaces the current one.
    pub fn toggle(&mut self, key: &str, url: &str) -> Result<&PlaybackState> {
        if self.state.is_playing_key(key) {
            debug!(key = %key, "Toggling off playing sound");
            self.stop();
            return Ok(&self.state);
        }

        self.start(key, url)?;
        Ok(&self.state)
    }

    /// Start `key` from the beginning, replacing anything that is playing
    pub fn start(&mut self, key: &str, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(PlaybackError::MissingSource(key.to_string()));
        }

        if let PlaybackState::Playing { key: previous } = std::mem::take(&mut self.state) {
            debug!(from = %previous, to = %key, "Replacing playing sound");
            self.pending_events.push(PlaybackEvent::Stopped { key: previous });
        }
        self.progress = 0.0;

        match self.output.play(url) {
            Ok(()) => {
                info!(key = %key, url = %url, "Playing sound");
                self.state = PlaybackState::Playing {
                    key: key.to_string(),
                };
                self.pending_events.push(PlaybackEvent::Started {
                    key: key.to_string(),
                    url: url.to_string(),
                });
                Ok(())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to start sound");
                self.output.stop();
                self.pending_events.push(PlaybackEvent::Error {
                    key: key.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Stop whatever is playing and return to Idle
    pub fn stop(&mut self) {
        if let PlaybackState::Playing { key } = std::mem::take(&mut self.state) {
            self.output.stop();
            info!(key = %key, "Stopped sound");
            self.pending_events.push(PlaybackEvent::Stopped { key });
        }
        self.progress = 0.0;
    }

    /// Poll the output: update progress, detect natural end or a failed load
    ///
    /// Call periodically while a sound plays. Returns the current progress.
    pub fn tick(&mut self) -> f64 {
        let Some(key) = self.state.playing_key().map(str::to_string) else {
            return self.progress;
        };

        if let Some(message) = self.output.take_error() {
            self.output.stop();
            self.state = PlaybackState::Idle;
            self.progress = 0.0;
            warn!(key = %key, error = %message, "Sound failed to load");
            self.pending_events
                .push(PlaybackEvent::Error { key, message });
            return self.progress;
        }

        if self.output.is_finished() {
            self.output.stop();
            self.state = PlaybackState::Idle;
            self.progress = 0.0;
            debug!(key = %key, "Sound finished");
            self.pending_events.push(PlaybackEvent::Finished { key });
            return self.progress;
        }

        let percent = progress_percent(self.output.position(), self.output.duration());
        if percent != self.progress {
            self.progress = percent;
            self.pending_events
                .push(PlaybackEvent::Progress { key, percent });
        }
        self.progress
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
