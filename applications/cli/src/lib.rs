//! Soundboard front end
//!
//! Terminal rendition of the soundboard: log in through the OAuth implicit grant,
//! browse the community's sounds, filter them, and play one at a time.
//!
//! This library exposes the front end's components for testing purposes.

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod preferences;
pub mod session;
pub mod view;

// Re-export commonly used types for convenience
pub use app::{App, FetchOutcome, Flow};
pub use command::{Command, Target};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use preferences::{Preferences, PreferencesStore, Theme};
pub use session::SessionContext;
pub use view::{SoundCard, View, ViewSettings};
