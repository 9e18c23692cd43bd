//! Typed preference access
//!
//! Reads are total: a missing key, a backend failure or a value that no
//! longer parses all come back as "absent". Writes report backend failures.

use crate::store::{KeyValueStore, PrefKey, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Shared handle to the injected key-value backend
#[derive(Clone)]
pub struct Preferences {
    backend: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read a JSON value, falling back to `T::default()`
    pub fn get<T: DeserializeOwned + Default>(&self, key: PrefKey) -> T {
        self.get_json(key).unwrap_or_default()
    }

    /// Read a JSON value; malformed data counts as absent
    pub fn get_json<T: DeserializeOwned>(&self, key: PrefKey) -> Option<T> {
        let raw = self.get_text(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding malformed stored value");
                None
            }
        }
    }

    /// Read a plain string value
    pub fn get_text(&self, key: PrefKey) -> Option<String> {
        match self.backend.get(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Preference read failed");
                None
            }
        }
    }

    /// Store a value as JSON
    pub fn set<T: Serialize + ?Sized>(&self, key: PrefKey, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_text(key, &raw)
    }

    /// Store a plain string value
    pub fn set_text(&self, key: PrefKey, value: &str) -> StoreResult<()> {
        self.backend.set(key.as_str(), value)?;
        tracing::debug!(key = %key, "Preference written");
        Ok(())
    }

    pub fn remove(&self, key: PrefKey) -> StoreResult<()> {
        self.backend.remove(key.as_str())?;
        tracing::debug!(key = %key, "Preference removed");
        Ok(())
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Lock("unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Lock("unavailable".to_string()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Lock("unavailable".to_string()))
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        prefs.set(PrefKey::DarkMode, &true).unwrap();
        assert!(prefs.get::<bool>(PrefKey::DarkMode));
    }

    #[test]
    fn test_missing_value_is_default() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        assert!(!prefs.get::<bool>(PrefKey::DarkMode));
        assert_eq!(prefs.get_text(PrefKey::Token), None);
    }

    #[test]
    fn test_malformed_json_is_default() {
        let store = MemoryStore::with_entries([("darkMode", "{not json")]);
        let prefs = Preferences::new(Arc::new(store));
        assert!(!prefs.get::<bool>(PrefKey::DarkMode));
        assert_eq!(prefs.get_json::<bool>(PrefKey::DarkMode), None);
    }

    #[test]
    fn test_backend_failure_reads_as_absent() {
        let prefs = Preferences::new(Arc::new(BrokenStore));
        assert_eq!(prefs.get_text(PrefKey::Language), None);
        assert!(!prefs.get::<bool>(PrefKey::DarkMode));
        assert!(prefs.set_text(PrefKey::Language, "en").is_err());
        assert!(prefs.remove(PrefKey::Token).is_err());
    }

    #[test]
    fn test_plain_text_is_not_json_encoded() {
        let store = Arc::new(MemoryStore::new());
        let prefs = Preferences::new(store.clone());
        prefs.set_text(PrefKey::Language, "en").unwrap();
        assert_eq!(store.get("language").unwrap().as_deref(), Some("en"));

        prefs.set(PrefKey::DarkMode, &false).unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
    }
}
