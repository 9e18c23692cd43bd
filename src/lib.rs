//! # WolfAuth Portal
//!
//! Client side of the WolfAuth account portal: login, registration, a
//! profile page with an editor, and a settings panel, all backed by a small
//! persistent preference store.
//!
//! ## Modules
//!
//! - [`store`]: Key-value preference storage (SQLite or in-memory)
//! - [`profile`]: Profile record, avatar encoding and showcase data
//! - [`settings`]: Theme and language preferences
//! - [`session`]: Access token lifecycle
//! - [`navigation`]: Routes and the authentication gate
//! - [`auth`]: HTTP client for the remote auth service
//! - [`screens`]: Per-screen state machines
//! - [`app`]: Runtime that executes screen effects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wolfauth_portal::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::open(std::path::Path::new("./wolfauth_data"))?;
//!     let auth = HttpAuthClient::new(AuthClientConfig::default())?;
//!     let mut portal = Portal::new(Preferences::new(Arc::new(store)), Arc::new(auth));
//!
//!     portal.open(Route::Login);
//!     portal
//!         .dispatch(LoginEvent::FieldChanged(LoginField::Identifier, "alice".into()))
//!         .await;
//!     portal
//!         .dispatch(LoginEvent::FieldChanged(LoginField::Password, "secret".into()))
//!         .await;
//!     portal.dispatch(LoginEvent::Submit).await;
//!
//!     println!("Authenticated: {}", portal.session().is_authenticated());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod navigation;
pub mod profile;
pub mod screens;
pub mod session;
pub mod settings;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use app::Portal;

pub use auth::{
    AuthApi, AuthClientConfig, AuthError, HttpAuthClient, LoginRequest, RegisterRequest,
    TokenResponse,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use navigation::{admit, Admission, Route};

pub use profile::{AvatarFile, ProfileField, UserProfile};

pub use screens::{
    EditProfileEvent, Effect, Event, LoginEvent, LoginField, ProfileEvent, ProfileTab,
    RegisterEvent, RegisterField, Screen, SettingsEvent,
};

pub use session::AuthSession;

pub use settings::{Language, SettingsRecord, Theme};

pub use store::{KeyValueStore, MemoryStore, PrefKey, Preferences, SqliteStore, StoreError, StoreResult};
