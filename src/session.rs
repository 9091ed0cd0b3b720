//! Durable session storage in the OS keychain.
//!
//! The bearer token is the only state the client persists across restarts.
//! Stored via the `keyring` crate under a fixed service name; on platforms
//! without a configured credential store the crate falls back to its mock
//! store, which is fine for development.

use keyring::Entry;
use thiserror::Error;

/// Keychain service name matching the Tauri app identifier.
const SERVICE_NAME: &str = "id.web.novarentech.siwasis";

/// Account name under which the auth token is stored.
const TOKEN_ACCOUNT: &str = "auth_token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("keychain operation failed: {0}")]
    OperationFailed(String),
}

impl From<keyring::Error> for SessionError {
    fn from(err: keyring::Error) -> Self {
        SessionError::OperationFailed(err.to_string())
    }
}

/// Keychain-backed store for the auth token.
///
/// Constructed once in `main` and handed to whoever needs it -- there is no
/// process-wide token global. Last write wins; the UI issues one request at
/// a time so no further coordination is needed.
#[derive(Clone, Default)]
pub struct SessionStore;

impl SessionStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self) -> Result<Entry, SessionError> {
        Ok(Entry::new(SERVICE_NAME, TOKEN_ACCOUNT)?)
    }

    /// Stored token, or `None` if the user never logged in (or logged out).
    pub fn get(&self) -> Result<Option<String>, SessionError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SessionError::from(e)),
        }
    }

    /// Persist the token, replacing any previous value.
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    /// Remove the stored token.
    ///
    /// Idempotent: ignores `NoEntry` (already cleared or never stored).
    pub fn clear(&self) -> Result<(), SessionError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SessionError::from(e)),
        }
    }
}
