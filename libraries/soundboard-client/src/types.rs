//! Configuration types for the Soundboard HTTP clients.

/// Discord REST API root
pub const DEFAULT_IDENTITY_API_BASE: &str = "https://discord.com/api";

/// Where the two services live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Identity provider API root (e.g., "https://discord.com/api")
    pub identity_api_base: String,
    /// Catalog backend root (e.g., "https://sounds.example.com")
    pub catalog_url: String,
}

impl ClientConfig {
    /// Create a config from the two service roots.
    pub fn new(identity_api_base: impl Into<String>, catalog_url: impl Into<String>) -> Self {
        Self {
            identity_api_base: identity_api_base.into(),
            catalog_url: catalog_url.into(),
        }
    }

    /// Config with the default identity provider and the given catalog backend.
    pub fn with_catalog(catalog_url: impl Into<String>) -> Self {
        Self::new(DEFAULT_IDENTITY_API_BASE, catalog_url)
    }
}
