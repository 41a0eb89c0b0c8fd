//! Message deep links
//!
//! Pure string composition; the link is only surfaced, never fetched.

use crate::types::Sound;

/// Host used for message links when none is configured
pub const DEFAULT_LINK_HOST: &str = "discord.com";

/// Link to the chat message a sound was posted in
///
/// Format: `https://<host>/channels/<community_id>/<channel_id>/<message_id>`
pub fn message_link(host: &str, community_id: &str, sound: &Sound) -> String {
    format!(
        "https://{}/channels/{}/{}/{}",
        host.trim_end_matches('/'),
        community_id,
        sound.channel_id,
        sound.message_id
    )
}
