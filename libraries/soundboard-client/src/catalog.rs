//! Catalog backend: community id → sound catalog.

use crate::client::{error_for_status, read_json};
use crate::error::{ClientError, Result};
use reqwest::Client;
use soundboard_core::{CatalogResponse, SoundCatalog};
use tracing::{debug, info, warn};

/// Query parameter carrying the community id
pub const GUILD_ID_PARAM: &str = "guildID";

/// Catalog backend client.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get the community's sound catalog (`GET /?guildID=<id>`).
    ///
    /// Authenticated by cookies, not by the bearer token. One request, no retry.
    pub async fn fetch_catalog(&self, community_id: &str) -> Result<SoundCatalog> {
        let url = format!("{}/", self.base_url);
        debug!(url = %url, community_id = %community_id, "Fetching sound catalog");

        let response = self
            .http
            .get(&url)
            .query(&[(GUILD_ID_PARAM, community_id)])
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let error = error_for_status(response).await;
            warn!(status = %status, error = %error, "Catalog request failed");
            return Err(error);
        }

        let body: CatalogResponse = read_json(response, "sound catalog").await?;
        info!(sounds = body.sound_list.len(), "Fetched sound catalog");
        Ok(body.sound_list)
    }
}
