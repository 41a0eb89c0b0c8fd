//! Interactive front end
//!
//! One control flow: the loop multiplexes input lines, finished fetches and a
//! progress ticker. Fetches run as spawned tasks and report back over a channel,
//! tagged with the session generation they were issued under.

use crate::command::{Command, Target, HELP};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::preferences::{Preferences, PreferencesStore, Theme};
use crate::session::SessionContext;
use crate::view::{View, ViewSettings};
use soundboard_client::{ClientConfig, ClientError, SoundboardClient};
use soundboard_core::{SessionToken, SoundCatalog, UserInfo};
use soundboard_playback::{AudioOutput, PlaybackController, PlaybackEvent};
use soundboard_session::{authorize_url, consume_redirect, SessionError, SessionStore};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Result of a spawned fetch
#[derive(Debug)]
pub enum FetchOutcome {
    Profile {
        generation: u64,
        result: std::result::Result<UserInfo, ClientError>,
    },
    Catalog {
        generation: u64,
        result: std::result::Result<SoundCatalog, ClientError>,
    },
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<O: AudioOutput> {
    config: AppConfig,
    client: SoundboardClient,
    store: Arc<dyn SessionStore>,
    preferences: PreferencesStore,
    theme: Theme,
    login_url: String,
    open_browser: bool,
    context: SessionContext,
    controller: PlaybackController<O>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
}

impl<O: AudioOutput> App<O> {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn SessionStore>,
        preferences: PreferencesStore,
        output: O,
    ) -> Result<Self> {
        let client = SoundboardClient::new(ClientConfig::new(
            config.identity.api_base.clone(),
            config.catalog.backend_url.clone(),
        ))?;
        let login_url = authorize_url(&config.oauth_config())?.to_string();
        let theme = preferences.load().theme;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            store,
            preferences,
            theme,
            login_url,
            open_browser: false,
            context: SessionContext::new(),
            controller: PlaybackController::new(output),
            outcome_tx,
            outcome_rx,
            in_flight: 0,
        })
    }

    /// Open the login page in the browser on `login`
    pub fn with_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn controller(&self) -> &PlaybackController<O> {
        &self.controller
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Startup: consume a login redirect once, then restore the stored session
    pub fn start(&mut self, redirect: Option<&str>) -> Result<()> {
        match consume_redirect(self.store.as_ref(), redirect) {
            Ok(_) => {}
            Err(SessionError::OAuthDenied(reason)) => {
                warn!(reason = %reason, "Login was not completed");
            }
            Err(e) => return Err(e.into()),
        }

        match self.store.load()? {
            Some(token) => {
                info!("Restoring stored session");
                self.begin_session(token);
            }
            None => debug!("No stored session"),
        }
        Ok(())
    }

    /// Finish a login with the address the provider redirected to
    pub fn complete_login(&mut self, redirect: &str) -> Result<()> {
        match consume_redirect(self.store.as_ref(), Some(redirect))? {
            Some(token) => {
                self.begin_session(token);
                Ok(())
            }
            None => Err(CliError::InvalidCommand(
                "That address carries no access token".to_string(),
            )),
        }
    }

    /// Stop playback, forget the token and everything fetched with it
    pub fn logout(&mut self) -> Result<()> {
        self.controller.stop();
        self.context.logout();
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Issue one profile and one catalog fetch for the current session
    ///
    /// Returns `false` when logged out.
    pub fn refresh(&mut self) -> bool {
        let Some(token) = self.context.token().cloned() else {
            return false;
        };
        let generation = self.context.generation();
        self.spawn_profile_fetch(generation, token);
        self.spawn_catalog_fetch(generation);
        true
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.context.set_search(term);
    }

    /// Toggle the sound `target` refers to
    pub fn select(&mut self, target: &Target) -> Result<()> {
        if !self.context.is_logged_in() {
            return Err(CliError::NotLoggedIn);
        }

        let (key, url) = match target {
            Target::Key(key) => self
                .context
                .catalog()
                .get(key)
                .map(|sound| (key.clone(), sound.url.clone()))
                .ok_or_else(|| CliError::UnknownSound(format!("'{}'", key)))?,
            Target::Index(position) => self
                .context
                .visible()
                .get(position.saturating_sub(1))
                .filter(|_| *position > 0)
                .map(|(key, sound)| ((*key).to_string(), sound.url.clone()))
                .ok_or_else(|| CliError::UnknownSound(format!("#{}", position)))?,
        };

        if let Err(e) = self.controller.toggle(&key, &url) {
            // The caller reports it; drop the queued copy so it is shown once
            self.controller.drain_events();
            return Err(e.into());
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Flip the theme and persist it
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.preferences.save(&Preferences { theme: self.theme })?;
        Ok(self.theme)
    }

    /// Advance the playback controller; returns the events it produced
    pub fn tick(&mut self) -> Vec<PlaybackEvent> {
        self.controller.tick();
        self.controller.drain_events()
    }

    /// Fold a finished fetch into the session
    ///
    /// Returns whether anything visible changed.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Result<bool> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            FetchOutcome::Profile {
                generation,
                result: Ok(user),
            } => {
                let applied = self.context.set_profile(generation, user);
                if applied {
                    debug!("Profile loaded");
                }
                Ok(applied)
            }
            FetchOutcome::Profile {
                generation,
                result: Err(e),
            } => {
                if !self.context.is_current(generation) {
                    return Ok(false);
                }
                // No banner for the profile; the badge just stays empty
                warn!(error = %e, "Failed to fetch profile");
                self.logout_if_rejected(&e)
            }
            FetchOutcome::Catalog {
                generation,
                result: Ok(catalog),
            } => {
                let count = catalog.len();
                let applied = self.context.set_catalog(generation, catalog);
                if applied {
                    info!(sounds = count, "Catalog loaded");
                }
                Ok(applied)
            }
            FetchOutcome::Catalog {
                generation,
                result: Err(e),
            } => {
                if !self.context.set_catalog_error(generation) {
                    return Ok(false);
                }
                warn!(error = %e, "Failed to fetch catalog");
                self.logout_if_rejected(&e)?;
                Ok(true)
            }
        }
    }

    /// Wait until every fetch issued so far has been applied
    pub async fn settle(&mut self) -> Result<()> {
        while self.in_flight > 0 {
            match self.outcome_rx.recv().await {
                Some(outcome) => {
                    self.apply_outcome(outcome)?;
                }
                None => break,
            }
        }
        Ok(())
    }

    pub fn view(&self) -> View {
        View::build(
            &self.context,
            self.controller.state(),
            self.controller.progress(),
            self.theme,
            &self.login_url,
            ViewSettings {
                link_host: &self.config.catalog.link_host,
                guild_id: &self.config.catalog.guild_id,
                cdn_base: &self.config.identity.cdn_base,
            },
        )
    }

    /// Execute one command, writing its feedback to `out`
    pub fn handle_command(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command {
            Command::Search(term) => {
                self.set_search(term);
                writeln!(out, "{}", self.view())?;
            }
            Command::Play(target) => {
                self.select(&target)?;
                self.write_status(out)?;
            }
            Command::Stop => {
                self.stop();
                self.write_status(out)?;
            }
            Command::Refresh => {
                if !self.refresh() {
                    return Err(CliError::NotLoggedIn);
                }
                writeln!(out, "Refreshing...")?;
            }
            Command::Login(None) => {
                writeln!(out, "Open this page to log in:\n  {}", self.login_url)?;
                writeln!(out, "Then run: login <the address you were sent back to>")?;
                if self.open_browser {
                    if let Err(e) = open::that(&self.login_url) {
                        warn!(error = %e, "Could not open a browser");
                    }
                }
            }
            Command::Login(Some(redirect)) => {
                self.complete_login(&redirect)?;
                writeln!(out, "Logged in. Loading sounds...")?;
            }
            Command::Logout => {
                self.logout()?;
                writeln!(out, "{}", self.view())?;
            }
            Command::Theme => {
                let theme = self.toggle_theme()?;
                writeln!(out, "Theme: {}", theme)?;
            }
            Command::Status => self.write_status(out)?,
            Command::List => writeln!(out, "{}", self.view())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Run the interactive loop until `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(self.config.progress_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stdout = std::io::stdout();

        writeln!(stdout, "{}", self.view())?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let flow = Command::parse(&line)
                        .and_then(|command| match command {
                            Some(command) => self.handle_command(command, &mut stdout),
                            None => Ok(Flow::Continue),
                        });
                    match flow {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => writeln!(stdout, "error: {}", e)?,
                    }
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    match self.apply_outcome(outcome) {
                        Ok(true) => writeln!(stdout, "{}", self.view())?,
                        Ok(false) => {}
                        Err(e) => writeln!(stdout, "error: {}", e)?,
                    }
                }
                _ = ticker.tick() => {
                    for event in self.tick() {
                        match event {
                            PlaybackEvent::Finished { key } => {
                                writeln!(stdout, "Finished: {}", key)?;
                            }
                            PlaybackEvent::Error { key, message } => {
                                writeln!(stdout, "Cannot play {}: {}", key, message)?;
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        self.controller.stop();
        Ok(())
    }

    fn begin_session(&mut self, token: SessionToken) {
        self.controller.stop();
        self.context.login(token);
        self.refresh();
    }

    fn spawn_profile_fetch(&mut self, generation: u64, token: SessionToken) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.fetch_profile(&token).await;
            let _ = tx.send(FetchOutcome::Profile { generation, result });
        });
    }

    fn spawn_catalog_fetch(&mut self, generation: u64) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();
        let guild_id = self.config.catalog.guild_id.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.fetch_catalog(&guild_id).await;
            let _ = tx.send(FetchOutcome::Catalog { generation, result });
        });
    }

    fn logout_if_rejected(&mut self, error: &ClientError) -> Result<bool> {
        if error.is_unauthorized()
            && self.config.session.clear_on_unauthorized
            && self.context.is_logged_in()
        {
            info!("Session rejected by the server, logging out");
            self.logout()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn write_status(&self, out: &mut impl Write) -> Result<()> {
        match self.controller.current_key() {
            Some(key) => writeln!(out, "Playing {} ({:.0}%)", key, self.controller.progress())?,
            None => writeln!(out, "Nothing playing")?,
        }
        Ok(())
    }
}
