/// Audio output errors
use thiserror::Error;

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable output device
    #[error("Device error: {0}")]
    DeviceError(String),

    /// Source could not be fetched
    #[error("Failed to fetch source: {0}")]
    FetchError(String),

    /// Source could not be decoded
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Playback error
    #[error("Playback error: {0}")]
    PlaybackError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AudioError> for soundboard_playback::PlaybackError {
    fn from(e: AudioError) -> Self {
        match e {
            AudioError::DeviceError(msg) => Self::OutputUnavailable(msg),
            other => Self::AudioSource(other.to_string()),
        }
    }
}
