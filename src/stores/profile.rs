use schema::UserProfile;
use std::sync::Arc;
use tracing::{debug, warn};

use super::observable::{Listeners, Subscription};
use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// Storage key owned by the profile store.
pub const PROFILE_KEY: &str = "user_profile";

/// The persisted user profile plus its change notifications.
///
/// The profile is always read and written whole; there is no per-field
/// update, only [`ProfileStore::update`] as a read-modify-write helper.
pub struct ProfileStore {
    storage: Arc<dyn KeyValueStore>,
    listeners: Listeners<UserProfile>,
}

impl ProfileStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            listeners: Listeners::new(),
        }
    }

    /// The stored profile, or the default one when nothing usable is stored.
    pub fn get(&self) -> UserProfile {
        let stored = match self.storage.get(PROFILE_KEY) {
            Ok(stored) => stored,
            Err(error) => {
                warn!(%error, "profile unreadable, using default");
                None
            }
        };

        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|error| {
                warn!(%error, "stored profile unparsable, using default");
                UserProfile::default()
            }),
            None => UserProfile::default(),
        }
    }

    /// Overwrites the stored profile and notifies every listener once.
    pub fn set(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile).map_err(|e| StorageError::Serialize {
            key: PROFILE_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.storage.set(PROFILE_KEY, &json)?;
        debug!(nickname = %profile.nickname, "profile saved");
        self.listeners.notify(profile);
        Ok(())
    }

    /// Reads the profile, applies `edit` and writes the result back.
    pub fn update<F>(&self, edit: F) -> Result<UserProfile, StorageError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.get();
        edit(&mut profile);
        self.set(&profile)?;
        Ok(profile)
    }

    /// Calls `listener` after every [`ProfileStore::set`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&UserProfile) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Like [`ProfileStore::subscribe`], but also calls `listener` right away
    /// with the current profile.
    pub fn watch<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&UserProfile) + Send + Sync + 'static,
    {
        listener(&self.get());
        self.listeners.subscribe(listener)
    }
}
