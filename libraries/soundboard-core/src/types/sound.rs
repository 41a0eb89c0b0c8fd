/// Sound domain type
use serde::{Deserialize, Serialize};

/// Label shown when a sound carries no loudness hint
const DEFAULT_VOLUME_LABEL: &str = "Default";

/// A playable clip posted in the community's chat
///
/// Immutable once fetched. The display name lives in the catalog key, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sound {
    /// Identifier of the chat message the sound was posted in
    pub message_id: String,

    /// Playable media location (URL or local path)
    pub url: String,

    /// Optional loudness hint; absent or zero means the default level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Identifier of the chat channel the message belongs to
    pub channel_id: String,
}

impl Sound {
    /// Create a sound without a loudness hint
    pub fn new(
        message_id: impl Into<String>,
        url: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            url: url.into(),
            volume: None,
            channel_id: channel_id.into(),
        }
    }

    /// Set the loudness hint
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Loudness hint as displayed on a sound card
    ///
    /// `"Default"` when the hint is absent or zero, otherwise the number itself.
    pub fn volume_label(&self) -> String {
        match self.volume {
            Some(volume) if volume != 0.0 && volume.is_finite() => volume.to_string(),
            _ => DEFAULT_VOLUME_LABEL.to_string(),
        }
    }
}
