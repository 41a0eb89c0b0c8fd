//! Session context: the one explicit state object of the front end
//!
//! Its methods are the only mutators. Fetch results carry the generation they
//! were issued under; results from before the last login or logout are dropped.

use soundboard_core::{filter_catalog, SessionToken, Sound, SoundCatalog, UserInfo};
use tracing::debug;

/// Banner shown when the catalog cannot be fetched
pub const CATALOG_ERROR_MESSAGE: &str = "Failed to fetch sounds. Try `refresh`.";

#[derive(Debug, Default)]
pub struct SessionContext {
    token: Option<SessionToken>,
    user: Option<UserInfo>,
    catalog: SoundCatalog,
    error: Option<String>,
    search: String,
    generation: u64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Bumped on every login and logout
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Visible grid: catalog entries matching the search term, in catalog order
    pub fn visible(&self) -> Vec<(&str, &Sound)> {
        filter_catalog(&self.catalog, &self.search)
    }

    /// Enter the logged-in state with a fresh, empty session
    pub fn login(&mut self, token: SessionToken) {
        self.generation += 1;
        self.token = Some(token);
        self.user = None;
        self.catalog = SoundCatalog::new();
        self.error = None;
        debug!(generation = self.generation, "Session started");
    }

    /// Drop the token and everything fetched with it
    pub fn logout(&mut self) {
        self.generation += 1;
        self.token = None;
        self.user = None;
        self.catalog = SoundCatalog::new();
        self.error = None;
        self.search.clear();
        debug!(generation = self.generation, "Session ended");
    }

    /// Record the profile fetched under `generation`
    ///
    /// Returns `false` (and changes nothing) when the result is stale.
    pub fn set_profile(&mut self, generation: u64, user: UserInfo) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.user = Some(user);
        true
    }

    /// Replace the catalog wholesale and clear the banner
    pub fn set_catalog(&mut self, generation: u64, catalog: SoundCatalog) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.catalog = catalog;
        self.error = None;
        true
    }

    /// Show the fetch failure banner; the last known catalog stays
    pub fn set_catalog_error(&mut self, generation: u64) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.error = Some(CATALOG_ERROR_MESSAGE.to_string());
        true
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Whether a result issued under `generation` still belongs to this session
    pub fn is_current(&self, generation: u64) -> bool {
        self.token.is_some() && generation == self.generation
    }

    fn accepts(&self, generation: u64) -> bool {
        if !self.is_current(generation) {
            debug!(
                issued = generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }
        true
    }
}
