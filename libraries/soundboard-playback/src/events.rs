//! Playback Events
//!
//! Emitted by the controller and drained by the front end after each command or
//! progress tick.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A sound started playing
    Started {
        /// Catalog key of the sound
        key: String,
        /// Source handed to the output
        url: String,
    },

    /// A sound was stopped (toggled off, replaced, or stopped explicitly)
    Stopped {
        /// Catalog key of the sound
        key: String,
    },

    /// A sound reached its natural end
    Finished {
        /// Catalog key of the sound
        key: String,
    },

    /// Progress changed
    Progress {
        /// Catalog key of the sound
        key: String,
        /// Position as a percentage of the duration
        percent: f64,
    },

    /// The output could not play a sound
    Error {
        /// Catalog key of the sound
        key: String,
        /// Error message
        message: String,
    },
}
