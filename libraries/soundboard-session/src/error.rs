//! Error types for session handling.

use thiserror::Error;

/// Errors raised while storing a session or completing the login handshake.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the session file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file could not be encoded or decoded
    #[error("Session file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configured URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The identity provider redirected back with an error instead of a token
    #[error("Authorization denied: {0}")]
    OAuthDenied(String),

    /// No platform data directory to keep the session file in
    #[error("No data directory available for session storage")]
    NoStateDirectory,
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
