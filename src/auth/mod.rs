//! Remote Auth Client
//!
//! The authentication service is an external collaborator. Screens never
//! talk to it directly: they emit requests that the portal runtime runs
//! against an [`AuthApi`] implementation.
//!
//! - **client**: reqwest implementation plus request/response DTOs

mod client;

pub use client::{
    AuthClientConfig, AuthError, HttpAuthClient, LoginRequest, RegisterRequest,
    RegisterResponse, TokenResponse, LOGIN_PATH, REGISTER_PATH,
};

use async_trait::async_trait;

/// The two unauthenticated endpoints of the auth service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, AuthError>;

    /// Create an account
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, AuthError>;
}
