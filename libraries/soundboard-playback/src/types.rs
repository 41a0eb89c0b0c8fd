//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// At most one sound is ever selected; `Playing` names it by catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing selected
    #[default]
    Idle,

    /// The sound under `key` is loaded in the output
    Playing { key: String },
}

impl PlaybackState {
    /// Whether any sound is playing
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    /// Key of the playing sound
    pub fn playing_key(&self) -> Option<&str> {
        match self {
            Self::Playing { key } => Some(key),
            Self::Idle => None,
        }
    }

    /// Whether the sound under `key` is the one playing
    pub fn is_playing_key(&self, key: &str) -> bool {
        self.playing_key() == Some(key)
    }
}

/// Position as a percentage of the duration, in `[0, 100]`
///
/// Unknown or zero duration yields 0 so the display never sees a NaN.
pub fn progress_percent(position: Duration, duration: Option<Duration>) -> f64 {
    let Some(duration) = duration else {
        return 0.0;
    };
    if duration.is_zero() {
        return 0.0;
    }

    let percent = position.as_secs_f64() / duration.as_secs_f64() * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
