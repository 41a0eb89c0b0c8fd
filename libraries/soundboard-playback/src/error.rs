//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output could not open or decode the source
    #[error("Audio source error: {0}")]
    AudioSource(String),

    /// The output device is gone or never came up
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// Sound has no playable location
    #[error("Sound '{0}' has no playable URL")]
    MissingSource(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
