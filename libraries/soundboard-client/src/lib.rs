//! Soundboard Client
//!
//! HTTP clients for the two services the front end talks to.
//!
//! # Features
//!
//! - **Identity**: exchange a bearer token for the user's public profile
//! - **Catalog**: fetch the community's sound catalog (cookie credentials)
//!
//! Neither client retries; failures are reported to the caller as [`ClientError`].
//!
//! # Example
//!
//! ```ignore
//! use soundboard_client::{ClientConfig, SoundboardClient};
//! use soundboard_core::SessionToken;
//!
//! let client = SoundboardClient::new(ClientConfig::new(
//!     "https://discord.com/api",
//!     "https://sounds.example.com",
//! ))?;
//!
//! let user = client.fetch_profile(&SessionToken::new("...")).await?;
//! let catalog = client.fetch_catalog("123456789").await?;
//! println!("{} sees {} sounds", user.username, catalog.len());
//! ```

mod catalog;
mod client;
mod error;
mod identity;
mod types;

pub use catalog::{CatalogClient, GUILD_ID_PARAM};
pub use client::SoundboardClient;
pub use error::{ClientError, Result};
pub use identity::{IdentityClient, CURRENT_USER_PATH};
pub use types::{ClientConfig, DEFAULT_IDENTITY_API_BASE};
