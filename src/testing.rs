//! Test doubles shared across modules

use crate::auth::{
    AuthApi, AuthError, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse,
};
use crate::store::{KeyValueStore, MemoryStore, StoreResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Memory store that remembers every write
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values written to `key`, oldest first
    pub fn writes_to(&self, key: &str) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// Canned auth service outcome
#[derive(Debug, Clone)]
pub enum Reply {
    Token(String),
    Ack,
    Reject(u16, Option<String>),
    Unavailable,
}

impl Reply {
    fn error(&self) -> Option<AuthError> {
        match self {
            Reply::Reject(status, detail) => Some(AuthError::Rejected {
                status: *status,
                detail: detail.clone(),
            }),
            Reply::Unavailable => Some(AuthError::Unavailable),
            _ => None,
        }
    }
}

/// Auth service double with call counters
#[derive(Debug)]
pub struct FakeAuth {
    login: Reply,
    register: Reply,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    last_login: Mutex<Option<LoginRequest>>,
}

impl FakeAuth {
    pub fn new(login: Reply, register: Reply) -> Self {
        Self {
            login,
            register,
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            last_login: Mutex::new(None),
        }
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn last_login(&self) -> Option<LoginRequest> {
        self.last_login.lock().unwrap().clone()
    }
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self::new(Reply::Token("test-token".to_string()), Reply::Ack)
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_login.lock().unwrap() = Some(request.clone());

        if let Some(err) = self.login.error() {
            return Err(err);
        }
        match &self.login {
            Reply::Token(token) => Ok(TokenResponse {
                access_token: token.clone(),
                token_type: Some("bearer".to_string()),
            }),
            _ => Err(AuthError::Decode("missing access_token".to_string())),
        }
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);

        match self.register.error() {
            Some(err) => Err(err),
            None => Ok(serde_json::json!({ "status": "ok" })),
        }
    }
}
