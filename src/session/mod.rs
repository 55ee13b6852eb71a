//! Client-side session persistence.
//!
//! The session is two string entries in a key/value store, `token` and
//! `userId`. Views never touch the store directly; they go through a
//! [`SessionContext`] handed to them by the shell.

pub mod error;
pub mod file;
pub mod memory;

use std::sync::Arc;
use tracing::info;

pub use error::StoreError;
pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
#[cfg(test)]
pub use memory::FailingStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";

/// An authenticated session as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

/// String key/value storage that outlives a single run
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Write several entries as one change: if any write fails, the entries
    /// already written are put back the way they were.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            let previous = self.get(key)?;
            if let Err(e) = self.set(key, value) {
                for (key, previous) in written.into_iter().rev() {
                    let _ = match previous {
                        Some(value) => self.set(key, &value),
                        None => self.remove(key),
                    };
                }
                return Err(e);
            }
            written.push((*key, previous));
        }

        Ok(())
    }
}

/// Session handle passed to the views
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored token; an empty value counts as no token
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    #[cfg(test)]
    pub fn user_id(&self) -> Result<Option<String>, StoreError> {
        self.store.get(USER_ID_KEY)
    }

    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.store.set_many(&[
            (TOKEN_KEY, session.token.as_str()),
            (USER_ID_KEY, session.user_id.as_str()),
        ])?;
        info!("Session stored for user {}", session.user_id);
        Ok(())
    }

    /// Forget the local session. The server is not told.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> (Arc<MemorySessionStore>, SessionContext) {
        let store = Arc::new(MemorySessionStore::default());
        (store.clone(), SessionContext::new(store))
    }

    #[test]
    fn test_save_writes_both_keys() {
        let (store, session) = context();
        session
            .save(&Session { token: "t".to_string(), user_id: "7".to_string() })
            .unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
        assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some("7"));
        assert_eq!(session.token().unwrap().as_deref(), Some("t"));
        assert_eq!(session.user_id().unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let (store, session) = context();
        session
            .save(&Session { token: "t".to_string(), user_id: "7".to_string() })
            .unwrap();
        session.clear().unwrap();

        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_ID_KEY).unwrap().is_none());
    }

    #[test]
    fn test_failed_save_leaves_no_token_behind() {
        let store = Arc::new(FailingStore::failing_on_set(2));
        let session = SessionContext::new(store.clone());

        let result = session.save(&Session { token: "t".to_string(), user_id: "7".to_string() });

        assert!(result.is_err());
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
        assert!(store.get(USER_ID_KEY).unwrap().is_none());
        assert!(session.token().unwrap().is_none());
    }

    #[test]
    fn test_failed_save_restores_previous_session() {
        let store = Arc::new(FailingStore::failing_on_set(4));
        let session = SessionContext::new(store.clone());
        session
            .save(&Session { token: "old".to_string(), user_id: "1".to_string() })
            .unwrap();

        let result = session.save(&Session { token: "new".to_string(), user_id: "2".to_string() });

        assert!(result.is_err());
        assert_eq!(session.token().unwrap().as_deref(), Some("old"));
        assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let (store, session) = context();
        store.set(TOKEN_KEY, "").unwrap();
        assert!(session.token().unwrap().is_none());
    }
}
