//! Identity provider: token → public profile.

use crate::client::{error_for_status, read_json};
use crate::error::{ClientError, Result};
use reqwest::Client;
use soundboard_core::{SessionToken, UserInfo};
use tracing::{debug, info, warn};

/// Path of the "current user" endpoint under the API root
pub const CURRENT_USER_PATH: &str = "/users/@me";

/// Identity provider client.
pub struct IdentityClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> IdentityClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get the token owner's profile (`GET /users/@me`).
    ///
    /// One request, no retry.
    pub async fn fetch_profile(&self, token: &SessionToken) -> Result<UserInfo> {
        let url = format!("{}{}", self.base_url, CURRENT_USER_PATH);
        debug!(url = %url, "Fetching current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if !status.is_success() {
            let error = error_for_status(response).await;
            warn!(status = %status, error = %error, "Profile request failed");
            return Err(error);
        }

        let user: UserInfo = read_json(response, "user profile").await?;
        info!(user_id = %user.id, username = %user.username, "Fetched user profile");
        Ok(user)
    }
}
