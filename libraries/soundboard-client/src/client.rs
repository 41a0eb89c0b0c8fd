//! Main Soundboard client.

use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::identity::IdentityClient;
use crate::types::ClientConfig;
use reqwest::Client;
use soundboard_core::{SessionToken, SoundCatalog, UserInfo};
use std::time::Duration;

/// Client for the identity provider and the catalog backend.
///
/// Cheap to clone: clones share one connection pool and one cookie store, so a
/// fetch spawned on another task still sends the backend's cookies.
///
/// # Example
///
/// ```ignore
/// use soundboard_client::{ClientConfig, SoundboardClient};
///
/// let client = SoundboardClient::new(ClientConfig::with_catalog("https://sounds.example.com"))?;
/// let catalog = client.fetch_catalog("123456789").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SoundboardClient {
    http: Client,
    identity_api_base: String,
    catalog_url: String,
}

impl SoundboardClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let identity_api_base = normalize_url("identity", &config.identity_api_base)?;
        let catalog_url = normalize_url("catalog", &config.catalog_url)?;

        // Cookie store stands in for the browser's "credentials: include"
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .user_agent(format!("Soundboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            identity_api_base,
            catalog_url,
        })
    }

    /// Normalized identity provider API root.
    pub fn identity_api_base(&self) -> &str {
        &self.identity_api_base
    }

    /// Normalized catalog backend root.
    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    /// Identity provider operations.
    pub fn identity(&self) -> IdentityClient<'_> {
        IdentityClient::new(&self.http, &self.identity_api_base)
    }

    /// Catalog backend operations.
    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(&self.http, &self.catalog_url)
    }

    /// Public profile of the token's owner.
    pub async fn fetch_profile(&self, token: &SessionToken) -> Result<UserInfo> {
        self.identity().fetch_profile(token).await
    }

    /// Current sound catalog of `community_id`.
    pub async fn fetch_catalog(&self, community_id: &str) -> Result<SoundCatalog> {
        self.catalog().fetch_catalog(community_id).await
    }
}

fn normalize_url(which: &str, raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ClientError::InvalidUrl(format!(
            "{} URL cannot be empty",
            which
        )));
    }

    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(format!(
            "{} URL must start with http:// or https://",
            which
        )));
    }

    url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;
    Ok(url)
}

/// Turn a non-success response into the matching error.
pub(crate) async fn error_for_status(response: reqwest::Response) -> ClientError {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized;
    }

    let message = response.text().await.unwrap_or_default();
    ClientError::ServerError {
        status: status.as_u16(),
        message,
    }
}

/// Decode a JSON body, keeping the parse failure's context.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T> {
    let body = response.text().await.map_err(ClientError::Request)?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
