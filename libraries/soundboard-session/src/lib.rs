//! Soundboard Session
//!
//! Everything needed to get from "not logged in" to a bearer token, and to keep
//! that token across restarts.
//!
//! # Features
//!
//! - **Session store**: `save` / `load` / `clear` of the single bearer token
//! - **Implicit grant**: authorize URL builder and redirect fragment parser
//! - **Startup handshake**: consume a redirect once, idempotent when absent
//!
//! # Example
//!
//! ```rust
//! use soundboard_session::{consume_redirect, MemorySessionStore, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! let token = consume_redirect(
//!     &store,
//!     Some("http://localhost:3000/#token_type=Bearer&access_token=abc&scope=identify"),
//! )
//! .unwrap();
//!
//! assert_eq!(token.unwrap().as_str(), "abc");
//! assert!(store.load().unwrap().is_some());
//! ```

mod error;
mod oauth;
mod store;

pub use error::{Result, SessionError};
pub use oauth::{
    authorize_url, consume_redirect, parse_fragment, parse_redirect, OAuthConfig,
    RedirectFragment, DEFAULT_AUTHORIZE_URL, RESPONSE_TYPE, SCOPE,
};
pub use store::{
    default_state_dir, FileSessionStore, MemorySessionStore, SessionStore, SESSION_FILE_NAME,
    TOKEN_KEY,
};
