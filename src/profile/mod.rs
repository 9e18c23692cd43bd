//! Profile Model
//!
//! The editable user profile and the read-only collections shown next to it.
//!
//! - **avatar**: image file → embeddable data URI
//! - **showcase**: static sites, notifications and friends

pub mod avatar;
pub mod showcase;

pub use avatar::{AvatarError, AvatarFile};
pub use showcase::{Friend, FriendStatus, Notification, Site};

use crate::store::{PrefKey, Preferences, StoreResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_USERNAME: &str = "Иван Петров";
pub const DEFAULT_EMAIL: &str = "ivan.petrov@example.com";
pub const DEFAULT_TELEGRAM: &str = "https://t.me/your_username";
pub const DEFAULT_AVATAR: &str = "/media/default.png";

/// User profile persisted under [`PrefKey::Profile`]
///
/// Every field is always present: fields missing from a stored record are
/// filled with their defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_telegram")]
    pub telegram: String,

    /// Image URL or `data:` URI
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_email() -> String {
    DEFAULT_EMAIL.to_string()
}

fn default_telegram() -> String {
    DEFAULT_TELEGRAM.to_string()
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: default_username(),
            email: default_email(),
            telegram: default_telegram(),
            avatar: default_avatar(),
        }
    }
}

impl UserProfile {
    /// Load the stored profile, or the defaults if none is stored
    pub fn load(prefs: &Preferences) -> Self {
        prefs.get(PrefKey::Profile)
    }

    /// Persist the whole record in a single write
    pub fn save(&self, prefs: &Preferences) -> StoreResult<()> {
        prefs.set(PrefKey::Profile, self)
    }

    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
            ProfileField::Telegram => &self.telegram,
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Username => self.username = value,
            ProfileField::Email => self.email = value,
            ProfileField::Telegram => self.telegram = value,
        }
    }
}

/// Text fields of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Username,
    Email,
    Telegram,
}

impl ProfileField {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::Username => "username",
            ProfileField::Email => "email",
            ProfileField::Telegram => "telegram",
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
