//! Soundboard - Playback Control
//!
//! Platform-agnostic control of the one audio output the front end owns.
//!
//! This crate provides:
//! - A two-state machine (Idle / Playing) keyed by catalog display name
//! - Toggle semantics: selecting the playing sound stops it
//! - Progress as a percentage, 0 while the duration is unknown
//! - An event queue for UI synchronization
//!
//! # Architecture
//!
//! `soundboard-playback` never touches an audio device. The platform supplies an
//! [`AudioOutput`]; the controller owns it exclusively, which is what makes "at most
//! one sound at a time" hold: there is only one handle to play through.
//!
//! # Example
//!
//! ```rust
//! use soundboard_playback::{AudioOutput, PlaybackController, PlaybackState, Result};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct SilentOutput {
//!     source: Option<String>,
//! }
//!
//! impl AudioOutput for SilentOutput {
//!     fn play(&mut self, url: &str) -> Result<()> {
//!         self.source = Some(url.to_string());
//!         Ok(())
//!     }
//!     fn stop(&mut self) {
//!         self.source = None;
//!     }
//!     fn source(&self) -> Option<String> {
//!         self.source.clone()
//!     }
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn is_finished(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let mut controller = PlaybackController::new(SilentOutput::default());
//!
//! controller.toggle("Air Horn", "a.mp3").unwrap();
//! assert_eq!(controller.state(), &PlaybackState::Playing { key: "Air Horn".into() });
//!
//! // Selecting the same sound again stops it
//! controller.toggle("Air Horn", "a.mp3").unwrap();
//! assert_eq!(controller.state(), &PlaybackState::Idle);
//! assert_eq!(controller.progress(), 0.0);
//! ```

mod controller;
mod error;
mod events;
mod output;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::AudioOutput;
pub use types::{progress_percent, PlaybackState};
