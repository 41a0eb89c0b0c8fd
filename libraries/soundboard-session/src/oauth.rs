//! OAuth implicit grant
//!
//! The provider hands the access token back in the redirect URL's fragment. The
//! fragment never reaches a server, so the client parses it itself.

use crate::error::{Result, SessionError};
use crate::store::SessionStore;
use soundboard_core::SessionToken;
use tracing::{debug, info, warn};
use url::Url;

/// Discord's authorize endpoint
pub const DEFAULT_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";

/// Implicit grant: token in the fragment, no code exchange
pub const RESPONSE_TYPE: &str = "token";

/// Only basic identity is ever requested
pub const SCOPE: &str = "identify";

/// Fixed parameters of the login redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    /// Provider authorize endpoint
    pub authorize_url: String,
    /// Application client id registered with the provider
    pub client_id: String,
    /// Where the provider sends the user back to
    pub redirect_uri: String,
}

impl OAuthConfig {
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// URL the user opens to log in
pub fn authorize_url(config: &OAuthConfig) -> Result<Url> {
    let mut url = Url::parse(&config.authorize_url)
        .map_err(|e| SessionError::InvalidUrl(format!("{}: {}", config.authorize_url, e)))?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", RESPONSE_TYPE)
        .append_pair("scope", SCOPE);

    Ok(url)
}

/// Parameters carried in a successful redirect fragment
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectFragment {
    pub access_token: SessionToken,
    pub token_type: Option<String>,
    /// Lifetime in seconds, as announced by the provider (not tracked)
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

/// Parse the fragment part of a redirect
///
/// Accepts a full redirect URL (`https://app/#access_token=...`), a fragment with
/// its leading `#`, or a bare `key=value&...` string. Returns `None` when there
/// is no fragment or it carries no access token.
pub fn parse_fragment(input: &str) -> Result<Option<RedirectFragment>> {
    let input = input.trim();
    let fragment = match input.split_once('#') {
        Some((_, fragment)) => fragment,
        None if input.contains("access_token=") || input.contains("error=") => input,
        None => return Ok(None),
    };

    if fragment.is_empty() {
        return Ok(None);
    }

    let mut access_token = None;
    let mut token_type = None;
    let mut expires_in = None;
    let mut scope = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "token_type" => token_type = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse().ok(),
            "scope" => scope = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        let message = match error_description {
            Some(description) => format!("{} ({})", error, description),
            None => error,
        };
        warn!(error = %message, "Identity provider returned an error");
        return Err(SessionError::OAuthDenied(message));
    }

    Ok(access_token
        .map(SessionToken::new)
        .filter(|token| !token.is_empty())
        .map(|access_token| RedirectFragment {
            access_token,
            token_type,
            expires_in,
            scope,
        }))
}

/// Access token from a redirect, if it carries one
pub fn parse_redirect(input: &str) -> Result<Option<SessionToken>> {
    Ok(parse_fragment(input)?.map(|fragment| fragment.access_token))
}

/// Consume a login redirect once at startup
///
/// When `input` carries a token it is saved to `store` and returned. Missing
/// input or a redirect without a token leaves the store untouched.
pub fn consume_redirect(
    store: &dyn SessionStore,
    input: Option<&str>,
) -> Result<Option<SessionToken>> {
    let Some(input) = input else {
        return Ok(None);
    };

    match parse_fragment(input)? {
        Some(fragment) => {
            store.save(&fragment.access_token)?;
            info!(
                token_type = fragment.token_type.as_deref().unwrap_or("unknown"),
                scope = fragment.scope.as_deref().unwrap_or(""),
                "Session token captured from redirect"
            );
            Ok(Some(fragment.access_token))
        }
        None => {
            debug!("Redirect carried no access token");
            Ok(None)
        }
    }
}
