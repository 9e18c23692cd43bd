//! Profile viewer
//!
//! Read-only view of the stored profile plus the showcase collections.

use crate::navigation::Route;
use crate::profile::showcase::{self, Friend, Notification, Site};
use crate::profile::UserProfile;
use crate::screens::{Effect, MSG_SAVE_FAILED};
use crate::session::AuthSession;
use crate::store::Preferences;
use chrono::{DateTime, Utc};

pub const TELEGRAM_BOT_URL: &str = "https://t.me/BabanSatiBot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Friends,
    Notifications,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    SelectTab(ProfileTab),
    Logout,
    EditProfile,
    Settings,
    Back,
    OpenSite(u32),
    OpenTelegramBot,
}

pub struct ProfileScreen {
    prefs: Preferences,
    profile: UserProfile,
    tab: ProfileTab,
    loaded_at: DateTime<Utc>,
    sites: Vec<Site>,
    notifications: Vec<Notification>,
    friends: Vec<Friend>,
    error: Option<String>,
}

impl ProfileScreen {
    pub fn new(prefs: Preferences, now: DateTime<Utc>) -> Self {
        let profile = UserProfile::load(&prefs);
        Self {
            prefs,
            profile,
            tab: ProfileTab::default(),
            loaded_at: now,
            sites: showcase::sites(),
            notifications: showcase::notifications(now),
            friends: showcase::friends(),
            error: None,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    /// Notification texts paired with their age at mount time
    pub fn notification_rows(&self) -> Vec<(&str, String)> {
        self.notifications
            .iter()
            .map(|n| (n.text, n.age_label(self.loaded_at)))
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle(&mut self, event: ProfileEvent) -> Vec<Effect> {
        match event {
            ProfileEvent::SelectTab(tab) => {
                self.tab = tab;
                Vec::new()
            }
            ProfileEvent::Logout => match AuthSession::end(&self.prefs) {
                Ok(()) => {
                    tracing::info!("Logged out");
                    vec![Effect::Navigate(Route::Login)]
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to clear session");
                    self.error = Some(MSG_SAVE_FAILED.to_string());
                    Vec::new()
                }
            },
            ProfileEvent::EditProfile => vec![Effect::Navigate(Route::EditProfile)],
            ProfileEvent::Settings => vec![Effect::Navigate(Route::Settings)],
            ProfileEvent::Back => vec![Effect::Back],
            ProfileEvent::OpenSite(id) => match self.sites.iter().find(|s| s.id == id) {
                Some(site) => vec![Effect::OpenExternal(site.url.to_string())],
                None => {
                    tracing::debug!(id, "Unknown site id");
                    Vec::new()
                }
            },
            ProfileEvent::OpenTelegramBot => {
                vec![Effect::OpenExternal(TELEGRAM_BOT_URL.to_string())]
            }
        }
    }
}
