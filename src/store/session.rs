//! Session storage seam.
//!
//! The session descriptor is persisted by the login flow, outside this crate.
//! The core reads it synchronously through [`SessionStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

use crate::error::BilledResult;
use crate::models::Session;

/// Read access to persisted key/value items.
pub trait SessionStore: Send + Sync {
    /// Returns the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;
}

/// Reads and parses the session stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored.
pub fn read_session(store: &dyn SessionStore, key: &str) -> BilledResult<Option<Session>> {
    store
        .get_item(key)
        .map(|raw| Session::from_json(key, &raw))
        .transpose()
}

/// Reads the session, treating a malformed descriptor as no session.
pub fn current_session(store: &dyn SessionStore, key: &str) -> Option<Session> {
    match read_session(store, key) {
        Ok(session) => session,
        Err(err) => {
            warn!(error = %err, "Ignoring malformed session");
            None
        }
    }
}

/// A [`SessionStore`] kept in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `session` under `key`.
    pub fn with_session(key: &str, session: &Session) -> Self {
        let store = Self::new();
        store.set_item(key, session.to_json());
        store
    }

    /// Stores `value` under `key`.
    pub fn set_item(&self, key: &str, value: impl Into<String>) {
        let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.into());
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }
}
