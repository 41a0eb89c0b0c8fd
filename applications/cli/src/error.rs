/// Front end error types
use soundboard_client::ClientError;
use soundboard_playback::PlaybackError;
use soundboard_session::SessionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Request failed: {0}")]
    Client(#[from] ClientError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("{0}")]
    InvalidCommand(String),

    #[error("No sound matches {0}")]
    UnknownSound(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
