//! Soundboard Core
//!
//! Platform-agnostic domain types and pure helpers shared by every Soundboard crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Sound`, `SoundCatalog`, `UserInfo`, `SessionToken`
//! - **Filtering**: case-insensitive substring search over a catalog, in catalog order
//! - **Links**: message deep links for the sound's originating chat message
//! - **Error Handling**: `SoundboardError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use soundboard_core::{filter_catalog, SoundCatalog};
//!
//! let catalog = SoundCatalog::from_json(r#"{
//!     "Air Horn": {"messageId": "m1", "url": "a.mp3", "volume": 0, "channelId": "c1"},
//!     "Boo":      {"messageId": "m2", "url": "b.mp3", "volume": 5, "channelId": "c1"}
//! }"#).unwrap();
//!
//! let visible = filter_catalog(&catalog, "air");
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].0, "Air Horn");
//! assert_eq!(visible[0].1.volume_label(), "Default");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod links;
pub mod types;

pub use error::{Result, SoundboardError};
pub use filter::{filter_catalog, matches_search};
pub use links::{message_link, DEFAULT_LINK_HOST};
pub use types::{CatalogResponse, SessionToken, Sound, SoundCatalog, UserInfo};
