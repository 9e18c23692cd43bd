//! Auth session
//!
//! The access token is the only proof of a session. There is no expiry or
//! refresh; the token stays until logout removes it.

use crate::store::{PrefKey, Preferences, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub token: Option<String>,
}

impl AuthSession {
    /// Read the session from the store; an empty token counts as absent
    pub fn load(prefs: &Preferences) -> Self {
        let token = prefs.get_text(PrefKey::Token).filter(|t| !t.is_empty());
        Self { token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Persist a freshly issued access token
    pub fn start(prefs: &Preferences, token: &str) -> StoreResult<Self> {
        prefs.set_text(PrefKey::Token, token)?;
        Ok(Self {
            token: Some(token.to_string()),
        })
    }

    /// Forget the stored token
    pub fn end(prefs: &Preferences) -> StoreResult<()> {
        prefs.remove(PrefKey::Token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_start_load_end() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        assert!(!AuthSession::load(&prefs).is_authenticated());

        let session = AuthSession::start(&prefs, "tok123").unwrap();
        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(AuthSession::load(&prefs), session);

        AuthSession::end(&prefs).unwrap();
        assert!(!AuthSession::load(&prefs).is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let store = MemoryStore::with_entries([("token", "")]);
        let prefs = Preferences::new(Arc::new(store));
        assert!(!AuthSession::load(&prefs).is_authenticated());
    }
}
