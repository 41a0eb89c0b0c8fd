//! Desktop audio output for Soundboard
//!
//! Implements [`soundboard_playback::AudioOutput`] on top of rodio. The device
//! stream is not `Send`, so it lives on a dedicated audio thread; the handle the
//! controller owns only sends commands and reads a status snapshot.

mod error;
mod output;
mod source;

pub use error::{AudioError, Result};
pub use output::{DesktopOutput, OutputCommand};
pub use source::SourceLoader;
