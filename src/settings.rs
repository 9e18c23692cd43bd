//! Settings Record
//!
//! Dark-mode flag and interface language, each stored under its own key.

use crate::store::{PrefKey, Preferences, StoreResult};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Ru, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Native display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::En => "English",
        }
    }

    /// Parse a supported code; anything else is `None`
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Global presentation theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsRecord {
    pub dark_mode: bool,
    pub language: Language,
}

impl SettingsRecord {
    /// Read both settings; unknown language codes fall back to the default
    pub fn load(prefs: &Preferences) -> Self {
        let dark_mode = prefs.get::<bool>(PrefKey::DarkMode);
        let language = match prefs.get_text(PrefKey::Language) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(code = %code, "Unsupported stored language, using default");
                Language::default()
            }),
            None => Language::default(),
        };
        Self {
            dark_mode,
            language,
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    pub fn save_dark_mode(&self, prefs: &Preferences) -> StoreResult<()> {
        prefs.set(PrefKey::DarkMode, &self.dark_mode)
    }

    pub fn save_language(&self, prefs: &Preferences) -> StoreResult<()> {
        prefs.set_text(PrefKey::Language, self.language.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        let record = SettingsRecord::load(&prefs);
        assert!(!record.dark_mode);
        assert_eq!(record.language, Language::Ru);
        assert_eq!(record.theme(), Theme::Light);
    }

    #[test]
    fn test_unsupported_language_reads_as_default() {
        for code in ["de", "EN", "", "ru-RU"] {
            let store = MemoryStore::with_entries([("language", code)]);
            let record = SettingsRecord::load(&Preferences::new(Arc::new(store)));
            assert_eq!(record.language, Language::default(), "code {:?}", code);
        }
    }

    #[test]
    fn test_save_and_load() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        let record = SettingsRecord {
            dark_mode: true,
            language: Language::En,
        };
        record.save_dark_mode(&prefs).unwrap();
        record.save_language(&prefs).unwrap();
        assert_eq!(SettingsRecord::load(&prefs), record);
    }

    #[test]
    fn test_corrupt_dark_mode_is_false() {
        let store = MemoryStore::with_entries([("darkMode", "maybe")]);
        let record = SettingsRecord::load(&Preferences::new(Arc::new(store)));
        assert!(!record.dark_mode);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::Ru.display_name(), "Русский");
    }

    #[test]
    fn test_theme_labels() {
        assert_eq!(Theme::from_dark_mode(true).to_string(), "dark");
        assert_eq!(Theme::from_dark_mode(false).to_string(), "light");
        assert_eq!(Language::En.to_string(), "en");
    }
}
