/// User domain type
use serde::{Deserialize, Serialize};

/// Public profile of the logged-in user, as returned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Provider user id
    pub id: String,

    /// Display name
    pub username: String,

    /// Avatar hash (absent when the user has no custom avatar)
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserInfo {
    /// Avatar image URL on the provider's CDN
    ///
    /// Returns `None` when the user has no avatar hash.
    pub fn avatar_url(&self, cdn_base: &str) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            format!(
                "{}/avatars/{}/{}.png",
                cdn_base.trim_end_matches('/'),
                self.id,
                hash
            )
        })
    }
}
