//! Profile editor
//!
//! ```text
//! Viewing --Enter--> Editing --Submit--> Submitting --saved--> Viewing (→ /profile)
//!                       |  ^                  └--invalid/failed--> Editing
//!                       |  └ FieldChanged / AvatarSelected (draft only)
//!                       └--Cancel--> Viewing (draft dropped, → /profile)
//! ```

use crate::navigation::Route;
use crate::profile::{AvatarFile, ProfileField, UserProfile};
use crate::screens::validation::{
    is_absolute_url, is_valid_email, FieldError, Validated, MSG_EMAIL, MSG_REQUIRED, MSG_URL,
};
use crate::screens::{Effect, MSG_SAVE_FAILED};
use crate::store::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditProfileState {
    Viewing,
    Editing,
    Submitting,
}

#[derive(Debug)]
pub enum EditProfileEvent {
    /// Start editing: load a fresh draft from the store
    Enter,
    FieldChanged(ProfileField, String),
    AvatarSelected(AvatarFile),
    Submit,
    Cancel,
}

/// Checks an HTML form would apply to the draft before submitting
pub fn validate_draft(draft: &UserProfile) -> Validated<UserProfile, ProfileField> {
    if draft.username.is_empty() {
        return Validated::Invalid(FieldError::new(ProfileField::Username, MSG_REQUIRED));
    }
    if draft.email.is_empty() {
        return Validated::Invalid(FieldError::new(ProfileField::Email, MSG_REQUIRED));
    }
    if !is_valid_email(&draft.email) {
        return Validated::Invalid(FieldError::new(ProfileField::Email, MSG_EMAIL));
    }
    if !draft.telegram.is_empty() && !is_absolute_url(&draft.telegram) {
        return Validated::Invalid(FieldError::new(ProfileField::Telegram, MSG_URL));
    }
    Validated::Valid(draft.clone())
}

pub struct EditProfileScreen {
    prefs: Preferences,
    state: EditProfileState,
    draft: Option<UserProfile>,
    error: Option<String>,
}

impl EditProfileScreen {
    /// Mount the screen straight into editing
    pub fn new(prefs: Preferences) -> Self {
        let mut screen = Self {
            prefs,
            state: EditProfileState::Viewing,
            draft: None,
            error: None,
        };
        screen.enter();
        screen
    }

    pub fn state(&self) -> EditProfileState {
        self.state
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    /// Image currently shown in the avatar preview
    pub fn avatar_preview(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.avatar.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle(&mut self, event: EditProfileEvent) -> Vec<Effect> {
        match event {
            EditProfileEvent::Enter => {
                self.enter();
                Vec::new()
            }
            EditProfileEvent::FieldChanged(field, value) => {
                match self.editing_draft() {
                    Some(draft) => draft.set_field(field, value),
                    None => tracing::debug!(field = %field, "Field change outside editing ignored"),
                }
                Vec::new()
            }
            EditProfileEvent::AvatarSelected(file) => {
                self.select_avatar(file);
                Vec::new()
            }
            EditProfileEvent::Submit => self.submit(),
            EditProfileEvent::Cancel => {
                self.draft = None;
                self.error = None;
                self.state = EditProfileState::Viewing;
                tracing::debug!("Profile edit cancelled");
                vec![Effect::Navigate(Route::Profile)]
            }
        }
    }

    fn enter(&mut self) {
        self.draft = Some(UserProfile::load(&self.prefs));
        self.error = None;
        self.state = EditProfileState::Editing;
    }

    fn editing_draft(&mut self) -> Option<&mut UserProfile> {
        if self.state == EditProfileState::Editing {
            self.draft.as_mut()
        } else {
            None
        }
    }

    fn select_avatar(&mut self, file: AvatarFile) {
        if self.state != EditProfileState::Editing {
            return;
        }
        match file.to_data_uri() {
            Ok(uri) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.avatar = uri;
                }
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(file = %file.name, error = %e, "Rejected avatar file");
                self.error = Some(e.to_string());
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Some(draft) = self.editing_draft().cloned() else {
            return Vec::new();
        };

        let profile = match validate_draft(&draft) {
            Validated::Valid(profile) => profile,
            Validated::Invalid(err) => {
                self.error = Some(format!("{}: {}", err.field, err.message));
                return Vec::new();
            }
        };

        self.state = EditProfileState::Submitting;
        match profile.save(&self.prefs) {
            Ok(()) => {
                tracing::info!(username = %profile.username, "Profile updated");
                self.draft = None;
                self.error = None;
                self.state = EditProfileState::Viewing;
                vec![Effect::Navigate(Route::Profile)]
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save profile");
                self.error = Some(MSG_SAVE_FAILED.to_string());
                self.state = EditProfileState::Editing;
                Vec::new()
            }
        }
    }
}
