//! Authentication session.
//!
//! The token and display name live in browser storage so a reload keeps the
//! user signed in. [`Session`] is provided through context by the root
//! component; route guards react to its `user` signal, so clearing the
//! session (logout or a 401) is enough to send the user back to the login
//! page.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use tracing::{debug, info, warn};

use crate::error::StorageError;

const TOKEN_KEY: &str = "token";
const NAME_KEY: &str = "userName";

/// Credentials persisted between page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub name: String,
}

/// Key-value persistence for the session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store, used when browser storage is unavailable and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Write(key.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    user: RwSignal<Option<String>>,
}

impl Session {
    /// Restores a session from storage. Both token and name must be present.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let user = match (store.get(TOKEN_KEY), store.get(NAME_KEY)) {
            (Some(token), Some(name)) if !token.is_empty() => {
                debug!("Restored session for {}", name);
                Some(name)
            }
            _ => None,
        };
        Self {
            store,
            user: RwSignal::new(user),
        }
    }

    /// Records a successful login or registration.
    pub fn login(&self, credentials: StoredSession) {
        if let Err(e) = self.store.set(TOKEN_KEY, &credentials.token) {
            warn!("Failed to persist token: {}", e);
        }
        if let Err(e) = self.store.set(NAME_KEY, &credentials.name) {
            warn!("Failed to persist user name: {}", e);
        }
        info!("Signed in as {}", credentials.name);
        self.user.set(Some(credentials.name));
    }

    pub fn logout(&self) {
        info!("Signed out");
        self.clear();
    }

    /// Called when the backend rejects the token. There is no refresh flow;
    /// the user has to sign in again.
    pub fn expire(&self) {
        warn!("Backend answered 401, clearing session");
        self.clear();
    }

    fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(NAME_KEY);
        self.user.set(None);
    }

    /// Bearer token to attach to requests, if signed in.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Reactive: re-runs dependants when the session changes.
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn user_name(&self) -> String {
        self.user.get().unwrap_or_default()
    }
}

pub fn use_session() -> Session {
    expect_context::<Session>()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The owner must outlive the session's signal.
    fn session_with(store: &MemoryStore) -> (Owner, Session) {
        let owner = Owner::new();
        owner.set();
        let session = Session::restore(Arc::new(store.clone()));
        (owner, session)
    }

    #[test]
    fn test_empty_storage_is_signed_out() {
        let store = MemoryStore::default();
        let (_owner, session) = session_with(&store);
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_restore_requires_token_and_name() {
        let store = MemoryStore::default();
        store.set(TOKEN_KEY, "abc").unwrap();
        assert!(!session_with(&store).1.is_authenticated());

        store.set(NAME_KEY, "Ana").unwrap();
        let (_owner, session) = session_with(&store);
        assert!(session.is_authenticated());
        assert_eq!(session.user_name(), "Ana");
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_login_persists_and_logout_clears() {
        let store = MemoryStore::default();
        let (_owner, session) = session_with(&store);
        session.login(StoredSession {
            token: "jwt".to_string(),
            name: "Bruno".to_string(),
        });
        assert!(session.is_authenticated());
        assert_eq!(store.get(NAME_KEY).as_deref(), Some("Bruno"));

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(NAME_KEY), None);
    }

    #[test]
    fn test_expire_clears_stored_session() {
        let store = MemoryStore::default();
        let (_owner, session) = session_with(&store);
        session.login(StoredSession {
            token: "jwt".to_string(),
            name: "Carla".to_string(),
        });
        session.expire();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }
}
