//! Session persistence
//!
//! Stores the bearer token and a snapshot of the logged-in user under two
//! independent keys. The two writes are not atomic: if the second one fails
//! the keys can drift apart.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use super::memory::MemoryStore;
use super::traits::KeyValueStore;
use crate::error::Result;
use crate::models::{MovieId, Session, UserProfile};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user snapshot
pub const USER_KEY: &str = "user";

/// Owner of the persisted session. All writes to the token and user keys go
/// through this type.
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    /// Serializes writers, including read-modify-write of the snapshot
    write_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    /// Session store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Bearer token, `None` when logged out
    pub fn token(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read token");
                None
            }
        }
    }

    /// Snapshot of the current user. Absence or corruption reads as an empty profile.
    pub fn snapshot(&self) -> UserProfile {
        let raw = match self.backend.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read user snapshot");
                return UserProfile::default();
            }
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "User snapshot is corrupt, treating as empty");
                UserProfile::default()
            }
        }
    }

    /// Username of the logged-in user, `None` when the snapshot carries no identity
    pub fn username(&self) -> Option<String> {
        let snapshot = self.snapshot();
        snapshot.has_identity().then_some(snapshot.username)
    }

    /// Full session, when both a token and an identity are present
    pub fn session(&self) -> Option<Session> {
        let token = self.token()?;
        let current_user = self.snapshot();
        current_user.has_identity().then_some(Session {
            token,
            current_user,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Start a session after a successful login
    #[instrument(skip(self, token, user), fields(username = %user.username))]
    pub fn begin(&self, token: &str, user: &UserProfile) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_snapshot(user)?;
        self.backend.set(TOKEN_KEY, token)?;
        debug!("Session started");
        Ok(())
    }

    /// Overwrite the user snapshot
    #[instrument(skip(self, profile), fields(username = %profile.username))]
    pub fn replace_snapshot(&self, profile: &UserProfile) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_snapshot(profile)
    }

    /// Overwrite only the favorites of the snapshot
    #[instrument(skip(self, favorites), fields(count = favorites.len()))]
    pub fn set_favorites(&self, favorites: &BTreeSet<MovieId>) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut snapshot = self.snapshot();
        snapshot.favorite_movies = favorites.clone();
        self.write_snapshot(&snapshot)
    }

    /// Forget the token and the snapshot
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(USER_KEY)?;
        debug!("Session cleared");
        Ok(())
    }

    fn write_snapshot(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.backend.set(USER_KEY, &raw)
    }
}
