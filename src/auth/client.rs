//! Remote Auth REST API Client
//!
//! HTTP client for the external authentication service's two endpoints.
//! Requests are sent once: there is no retry, and no timeout unless one is
//! configured.

use crate::auth::AuthApi;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Configuration for the auth client
#[derive(Debug, Clone)]
pub struct AuthClientConfig {
    /// Base URL of the auth service (e.g., "http://localhost:3001")
    pub base_url: String,
    /// Optional request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            request_timeout: None,
        }
    }
}

/// Auth API client over HTTP
pub struct HttpAuthClient {
    client: Client,
    config: AuthClientConfig,
}

impl HttpAuthClient {
    /// Create a new auth client with the given configuration
    pub fn new(config: AuthClientConfig) -> Result<Self, AuthError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AuthError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AuthClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        request_id: &str,
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| AuthError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| detail_message(&d));

        tracing::warn!(
            request_id = %request_id,
            status = status.as_u16(),
            detail = ?detail,
            "Auth service rejected request"
        );

        Err(AuthError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = self.url(LOGIN_PATH);
        tracing::debug!(request_id = %request_id, url = %url, "Sending login request");

        // The identifier travels as `username` whether it is an email or a handle
        let response = self
            .client
            .post(&url)
            .form(&[
                ("username", request.identifier.as_str()),
                ("password", request.password.as_str()),
            ])
            .send()
            .await
            .map_err(classify)?;

        Self::read_json(&request_id, response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = self.url(REGISTER_PATH);
        tracing::debug!(request_id = %request_id, url = %url, "Sending registration request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        Self::read_json(&request_id, response).await
    }
}

fn classify(e: reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::Timeout
    } else if e.is_connect() {
        AuthError::Unavailable
    } else {
        AuthError::Request(e)
    }
}

/// Flatten a `detail` value: plain strings pass through, validation error
/// lists are joined by their `msg` fields.
fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

// ============================================
// Request/Response DTOs
// ============================================

/// Login credentials
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Email or username
    pub identifier: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload, sent as JSON
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub telegram: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("telegram", &self.telegram)
            .finish()
    }
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Registration acknowledgement; its fields are not interpreted
pub type RegisterResponse = serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the auth service
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Auth service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Request timeout")]
    Timeout,

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl AuthError {
    /// Text to show the user
    ///
    /// Server-provided details are shown verbatim; everything else gets the
    /// caller's generic message.
    pub fn user_message(&self, rejected_fallback: &str, transport_fallback: &str) -> String {
        match self {
            AuthError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            AuthError::Rejected { detail: None, .. } => rejected_fallback.to_string(),
            _ => transport_fallback.to_string(),
        }
    }
}
