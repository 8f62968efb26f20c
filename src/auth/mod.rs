//! Bearer credential handling.
//!
//! The credential is loaded once per invocation into a `SessionContext`
//! which is handed explicitly to every remote call. A `401` never clears
//! anything by itself: the remote layer reports it, the operation marks the
//! context expired, and the command layer decides what to do with the store.

use crate::config::Config;
use crate::errors::AppResult;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    expired: bool,
}

impl SessionContext {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            expired: false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Authorization` header value, when a credential is present.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Called when the server answered 401: the credential is no longer usable.
    pub fn expire(&mut self) {
        self.token = None;
        self.expired = true;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

/// Plain-text token file inside the configuration directory.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located next to the configuration file
    pub fn default_location() -> Self {
        Self::new(Config::config_dir().join("credential"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(s) => {
                let token = s.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, format!("{}\n", token.trim()))?;
        Ok(())
    }

    /// Remove the stored token. Returns false if there was none.
    pub fn clear(&self) -> AppResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn context(&self) -> AppResult<SessionContext> {
        Ok(SessionContext::new(self.load()?))
    }
}
