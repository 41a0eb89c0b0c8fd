//! Session token storage
//!
//! One bearer token, no expiry, no refresh token. Presence at startup means
//! "logged in".

use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use soundboard_core::SessionToken;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Key the token is stored under
pub const TOKEN_KEY: &str = "token";

/// File name of the session document inside the state directory
pub const SESSION_FILE_NAME: &str = "session.json";

/// Durable home of the session token
///
/// `save` / `load` / `clear` are the only operations; the front end never reads
/// the storage any other way.
pub trait SessionStore: Send + Sync {
    /// Persisted token, if any
    fn load(&self) -> Result<Option<SessionToken>>;

    /// Persist `token`, replacing any previous one
    fn save(&self, token: &SessionToken) -> Result<()>;

    /// Remove the persisted token (no-op when absent)
    fn clear(&self) -> Result<()>;
}

/// Platform data directory for Soundboard state (`<data_local_dir>/soundboard`)
pub fn default_state_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("soundboard"))
        .ok_or(SessionError::NoStateDirectory)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, rename = "token", skip_serializing_if = "Option::is_none")]
    token: Option<SessionToken>,
}

/// Session store backed by a small JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session in `dir/session.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<SessionDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionDocument::default())
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(document) => Ok(document),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(SessionDocument::default())
            }
        }
    }

    fn write_document(&self, document: &SessionDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        let document = self.read_document()?;
        let token = document.token.filter(|token| !token.is_empty());
        debug!(path = %self.path.display(), present = token.is_some(), "Loaded session");
        Ok(token)
    }

    fn save(&self, token: &SessionToken) -> Result<()> {
        self.write_document(&SessionDocument {
            token: Some(token.clone()),
        })?;
        info!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process session store, gone when the process exits
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`
    pub fn with_token(token: impl Into<SessionToken>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, token: &SessionToken) -> Result<()> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        Ok(())
    }
}
