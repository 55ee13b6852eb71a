use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::{SessionStore, StoreError};
use crate::utils::encryption::SessionKey;

/// Session store backed by a flat JSON object on disk
///
/// Values are sealed with the session key when one is configured. The whole
/// file is rewritten on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    key: Option<SessionKey>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>, key: Option<SessionKey>) -> Self {
        Self { path: path.into(), key }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Entries to build the next write on, and whether the file must be
    /// rewritten regardless. A corrupt file is replaced rather than blocking
    /// every later login or logout.
    fn entries_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(StoreError::Serialisation(e)) => {
                warn!("Session file {} is corrupt, overwriting it: {}", self.path.display(), e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn seal(&self, value: &str) -> Result<String, StoreError> {
        match &self.key {
            Some(session_key) => Ok(session_key.seal(value)?),
            None => Ok(value.to_string()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        debug!("Wrote {} session entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(value) = self.read_entries()?.remove(key) else {
            return Ok(None);
        };

        match &self.key {
            Some(session_key) => Ok(Some(session_key.open(&value)?)),
            None => Ok(Some(value)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    /// All entries land in a single file rewrite
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let sealed = entries
            .iter()
            .map(|(key, value)| -> Result<(String, String), StoreError> {
                Ok((key.to_string(), self.seal(value)?))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let (mut stored, _) = self.entries_for_write()?;
        stored.extend(sealed);
        self.write_entries(&stored)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let (mut entries, corrupt) = self.entries_for_write()?;
        if entries.remove(key).is_some() || corrupt {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("transfer-client-{}-{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = FileSessionStore::new(temp_path("missing"), None);
        assert!(store.get("token").unwrap().is_none());
        store.remove("token").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_a_new_store() {
        let path = temp_path("persist");
        FileSessionStore::new(&path, None).set("token", "abc").unwrap();

        let reopened = FileSessionStore::new(&path, None);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("abc"));

        reopened.remove("token").unwrap();
        assert!(FileSessionStore::new(&path, None).get("token").unwrap().is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_sealed_values_are_not_plaintext_on_disk() {
        let path = temp_path("sealed");
        let key = SessionKey::from_hex(&"ab".repeat(32)).unwrap();
        let store = FileSessionStore::new(&path, Some(key));
        store.set("token", "very-secret-token").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("very-secret-token"));
        assert_eq!(store.get("token").unwrap().as_deref(), Some("very-secret-token"));

        let unkeyed = FileSessionStore::new(&path, None);
        assert_ne!(unkeyed.get("token").unwrap().as_deref(), Some("very-secret-token"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_fails_reads_but_not_writes() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path, None);
        assert!(matches!(store.get("token"), Err(StoreError::Serialisation(_))));

        store.set_many(&[("token", "fresh"), ("userId", "9")]).unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("fresh"));
        assert_eq!(store.get("userId").unwrap().as_deref(), Some("9"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_remove_replaces_corrupt_file() {
        let path = temp_path("corrupt-remove");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path, None);

        store.remove("token").unwrap();
        assert!(store.get("token").unwrap().is_none());
        let _ = std::fs::remove_file(&path);
    }
}
