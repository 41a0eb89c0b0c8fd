//! Platform-agnostic audio output trait
//!
//! Abstracts the host's media engine (rodio on desktop, a fake in tests).

use crate::error::Result;
use std::time::Duration;

/// The single audio output handle
///
/// Holds at most one source at a time: `play` replaces whatever was loaded.
pub trait AudioOutput: Send {
    /// Replace the current source with `url` and start playing it from the start
    fn play(&mut self, url: &str) -> Result<()>;

    /// Stop playback and unload the source
    fn stop(&mut self);

    /// Location of the loaded source, if any
    fn source(&self) -> Option<String>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total length of the loaded source
    ///
    /// `None` while unknown (still loading, or a format without length info).
    fn duration(&self) -> Option<Duration>;

    /// Whether the loaded source played to its natural end
    fn is_finished(&self) -> bool;

    /// Failure of a load that completed after `play` returned
    ///
    /// Outputs that load synchronously report every failure from `play` and keep
    /// the default.
    fn take_error(&mut self) -> Option<String> {
        None
    }
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn play(&mut self, url: &str) -> Result<()> {
        (**self).play(url)
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn source(&self) -> Option<String> {
        (**self).source()
    }

    fn position(&self) -> Duration {
        (**self).position()
    }

    fn duration(&self) -> Option<Duration> {
        (**self).duration()
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn take_error(&mut self) -> Option<String> {
        (**self).take_error()
    }
}
