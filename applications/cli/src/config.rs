/// Front end configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use soundboard_client::DEFAULT_IDENTITY_API_BASE;
use soundboard_core::DEFAULT_LINK_HOST;
use soundboard_session::{OAuthConfig, DEFAULT_AUTHORIZE_URL};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "soundboard.toml";

/// Environment variable prefix (`SOUNDBOARD_CATALOG__GUILD_ID=...`)
pub const ENV_PREFIX: &str = "SOUNDBOARD";

const MIN_PROGRESS_INTERVAL_MS: u64 = 10;
const MAX_PROGRESS_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub oauth: OAuthSettings,

    #[serde(default)]
    pub identity: IdentitySettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OAuthSettings {
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentitySettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_cdn_base")]
    pub cdn_base: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub backend_url: String,

    #[serde(default)]
    pub guild_id: String,

    #[serde(default = "default_link_host")]
    pub link_host: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Directory holding `session.json` and `preferences.json`
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Log out when either service answers 401
    #[serde(default)]
    pub clear_on_unauthorized: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
}

impl AppConfig {
    /// Load configuration: defaults, then a TOML file, then the environment
    ///
    /// With `path` set the file must exist. Without it `soundboard.toml` is
    /// looked up in the working directory, then in the platform config
    /// directory, and skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same layering with an explicit environment (`None` reads the process's)
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                if let Some(found) = default_config_path() {
                    tracing::debug!("Using config file {}", found.display());
                    settings = settings.add_source(config::File::from(found));
                }
            }
        }

        // Override with environment variables (prefixed with SOUNDBOARD_).
        // Values stay strings; ids such as guild ids must keep leading zeros.
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text (no file lookup, no environment)
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.oauth.client_id.trim().is_empty() {
            return Err(CliError::Config(
                "OAuth client id is required (set SOUNDBOARD_OAUTH__CLIENT_ID)".to_string(),
            ));
        }

        if self.catalog.backend_url.trim().is_empty() {
            return Err(CliError::Config(
                "Catalog backend URL is required (set SOUNDBOARD_CATALOG__BACKEND_URL)".to_string(),
            ));
        }

        if self.catalog.guild_id.trim().is_empty() {
            return Err(CliError::Config(
                "Community id is required (set SOUNDBOARD_CATALOG__GUILD_ID)".to_string(),
            ));
        }

        let interval = self.playback.progress_interval_ms;
        if !(MIN_PROGRESS_INTERVAL_MS..=MAX_PROGRESS_INTERVAL_MS).contains(&interval) {
            return Err(CliError::Config(format!(
                "playback.progress_interval_ms must be between {} and {} (got {})",
                MIN_PROGRESS_INTERVAL_MS, MAX_PROGRESS_INTERVAL_MS, interval
            )));
        }

        Ok(())
    }

    /// Parameters of the login redirect
    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig {
            authorize_url: self.oauth.authorize_url.clone(),
            client_id: self.oauth.client_id.clone(),
            redirect_uri: self.oauth.redirect_uri.clone(),
        }
    }

    /// State directory, falling back to the platform data directory
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.session.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(soundboard_session::default_state_dir()?),
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.playback.progress_interval_ms)
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("soundboard").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

// Default values
impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            authorize_url: default_authorize_url(),
            client_id: String::new(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            cdn_base: default_cdn_base(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            guild_id: String::new(),
            link_host: default_link_host(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: default_progress_interval_ms(),
        }
    }
}

fn default_authorize_url() -> String {
    DEFAULT_AUTHORIZE_URL.to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost:3000/".to_string()
}

fn default_api_base() -> String {
    DEFAULT_IDENTITY_API_BASE.to_string()
}

fn default_cdn_base() -> String {
    "https://cdn.discordapp.com".to_string()
}

fn default_link_host() -> String {
    DEFAULT_LINK_HOST.to_string()
}

fn default_progress_interval_ms() -> u64 {
    250
}
