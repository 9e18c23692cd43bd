//! Settings panel
//!
//! Every change is written back as soon as it is made; there is no save
//! button. Changing the language only persists the code: interface text is
//! not re-translated.

use crate::navigation::Route;
use crate::screens::{Effect, MSG_SAVE_FAILED};
use crate::settings::{Language, SettingsRecord};
use crate::store::Preferences;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    ToggleDarkMode,
    ChangeLanguage(String),
    Done,
}

pub struct SettingsScreen {
    prefs: Preferences,
    record: SettingsRecord,
    error: Option<String>,
}

impl SettingsScreen {
    /// Load the record and apply its theme
    pub fn mount(prefs: Preferences) -> (Self, Vec<Effect>) {
        let record = SettingsRecord::load(&prefs);
        let screen = Self {
            prefs,
            record,
            error: None,
        };
        (screen, vec![Effect::ApplyTheme(record.theme())])
    }

    pub fn record(&self) -> SettingsRecord {
        self.record
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Languages offered in the picker
    pub fn languages(&self) -> &'static [Language] {
        &Language::ALL
    }

    pub fn handle(&mut self, event: SettingsEvent) -> Vec<Effect> {
        match event {
            SettingsEvent::ToggleDarkMode => self.toggle_dark_mode(),
            SettingsEvent::ChangeLanguage(code) => {
                self.change_language(&code);
                Vec::new()
            }
            SettingsEvent::Done => vec![Effect::Navigate(Route::Profile)],
        }
    }

    fn toggle_dark_mode(&mut self) -> Vec<Effect> {
        let mut next = self.record;
        next.dark_mode = !next.dark_mode;

        if let Err(e) = next.save_dark_mode(&self.prefs) {
            tracing::error!(error = %e, "Failed to save dark mode");
            self.error = Some(MSG_SAVE_FAILED.to_string());
            return Vec::new();
        }

        self.record = next;
        self.error = None;
        tracing::debug!(dark_mode = next.dark_mode, "Dark mode toggled");
        vec![Effect::ApplyTheme(next.theme())]
    }

    fn change_language(&mut self, code: &str) {
        let Some(language) = Language::from_code(code) else {
            tracing::warn!(code = %code, "Ignoring unsupported language");
            return;
        };

        let mut next = self.record;
        next.language = language;

        if let Err(e) = next.save_language(&self.prefs) {
            tracing::error!(error = %e, "Failed to save language");
            self.error = Some(MSG_SAVE_FAILED.to_string());
            return;
        }

        self.record = next;
        self.error = None;
        // Interface text is not re-translated at runtime
        tracing::info!(language = %language, "Language changed");
    }
}
