//! Local Preference Store
//!
//! Durable key-value persistence for the portal's client-side state:
//!
//! - **memory**: process-local backend for tests and throwaway sessions
//! - **sqlite**: durable backend surviving restarts
//! - **preferences**: typed, total facade used by the screens
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Screen → Preferences (JSON / plain text, defaults on corruption)
//!        → dyn KeyValueStore (MemoryStore | SqliteStore)
//! ```
//!
//! The store is not coordinated across processes. Two portals writing the
//! same key race and the last writer wins.

pub mod error;
pub mod memory;
pub mod preferences;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use preferences::Preferences;
pub use sqlite::SqliteStore;

/// Raw string key-value backend
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Keys the portal persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// JSON-serialized user profile
    Profile,
    /// JSON boolean
    DarkMode,
    /// Plain language code
    Language,
    /// Plain access token
    Token,
}

impl PrefKey {
    /// Storage key name
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::Profile => "userProfile",
            PrefKey::DarkMode => "darkMode",
            PrefKey::Language => "language",
            PrefKey::Token => "token",
        }
    }
}

impl std::fmt::Display for PrefKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
