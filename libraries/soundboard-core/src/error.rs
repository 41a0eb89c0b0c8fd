/// Core error types for Soundboard
use thiserror::Error;

/// Result type alias using `SoundboardError`
pub type Result<T> = std::result::Result<T, SoundboardError>;

/// Core error type for Soundboard
#[derive(Error, Debug)]
pub enum SoundboardError {
    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

