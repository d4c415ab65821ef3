use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use super::observable::{Listeners, Subscription};
use crate::errors::{PokedexError, PokedexResult, StorageError};
use crate::storage::KeyValueStore;

/// Storage key owned by the session store.
pub const TOKEN_KEY: &str = "auth_token";

const VALID_USERNAME: &str = "iptdevs";
const VALID_PASSWORD: &str = "123456";

/// Result of submitting the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// Username or password left empty; nothing was checked.
    MissingCredentials,
    InvalidCredentials,
}

/// Mock authentication backed by the presence of a stored token.
///
/// The token is not a credential: it only marks that a login happened.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    listeners: Listeners<bool>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            listeners: Listeners::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.is_some_and(|t| !t.trim().is_empty()),
            Err(error) => {
                warn!(%error, "session token unreadable");
                false
            }
        }
    }

    /// Checks the fixed credential pair. On success a fresh token is stored
    /// and listeners receive `true`; a wrong pair returns `Ok(false)` and
    /// leaves the session as it was.
    pub fn login(&self, username: &str, password: &str) -> Result<bool, StorageError> {
        if username != VALID_USERNAME || password != VALID_PASSWORD {
            info!(username, "login rejected");
            return Ok(false);
        }

        self.storage.set(TOKEN_KEY, &generate_token(username))?;
        info!(username, "logged in");
        self.listeners.notify(&true);
        Ok(true)
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        info!("logged out");
        self.listeners.notify(&false);
        Ok(())
    }

    /// Login form submission: empty fields are rejected before the
    /// credential check. Input is compared exactly as typed.
    pub fn submit(&self, username: &str, password: &str) -> Result<LoginOutcome, StorageError> {
        if username.is_empty() || password.is_empty() {
            return Ok(LoginOutcome::MissingCredentials);
        }
        Ok(if self.login(username, password)? {
            LoginOutcome::Authenticated
        } else {
            LoginOutcome::InvalidCredentials
        })
    }

    /// Guard for operations that need a session.
    pub fn require_auth(&self) -> PokedexResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(PokedexError::NotAuthenticated)
        }
    }

    /// Calls `listener` with `true` after each login and `false` after each
    /// logout.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }
}

fn generate_token(username: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let nonce: u32 = rand::random();
    STANDARD.encode(format!("{username}:{millis}:{nonce:08x}"))
}
