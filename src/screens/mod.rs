//! View-State Controllers
//!
//! One explicit state machine per screen. A controller never renders and
//! never performs I/O beyond the injected preference store: it turns events
//! into new state plus a list of [`Effect`]s for the runtime to carry out.
//!
//! ```text
//! Event → Screen::handle → state change + Vec<Effect>
//!                               │
//!   Navigate / Reload / Back / OpenExternal / ApplyTheme / Request
//! ```

pub mod edit_profile;
pub mod login;
pub mod profile;
pub mod register;
pub mod settings;
pub mod validation;

pub use edit_profile::{EditProfileEvent, EditProfileScreen, EditProfileState};
pub use login::{LoginEvent, LoginField, LoginForm, LoginScreen, LoginStatus};
pub use profile::{ProfileEvent, ProfileScreen, ProfileTab};
pub use register::{RegisterEvent, RegisterField, RegisterForm, RegisterScreen, RegisterStatus};
pub use settings::{SettingsEvent, SettingsScreen};
pub use validation::{FieldError, Validated};

use crate::auth::{LoginRequest, RegisterRequest};
use crate::navigation::Route;
use crate::settings::Theme;
use crate::store::Preferences;
use chrono::Utc;

/// Shown when a preference write fails
pub const MSG_SAVE_FAILED: &str = "Failed to save changes";

/// Side effects requested by a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// In-app navigation
    Navigate(Route),
    /// Full reload at the given route; all screen state is rebuilt
    Reload(Route),
    /// Return to the previous route
    Back,
    /// Open a URL outside the portal
    OpenExternal(String),
    /// Switch the document-wide theme
    ApplyTheme(Theme),
    /// Call the auth service
    Request(AuthCall),
}

/// A call to the remote auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Input for whichever screen is mounted
#[derive(Debug)]
pub enum Event {
    Login(LoginEvent),
    Register(RegisterEvent),
    Profile(ProfileEvent),
    EditProfile(EditProfileEvent),
    Settings(SettingsEvent),
}

impl From<LoginEvent> for Event {
    fn from(event: LoginEvent) -> Self {
        Event::Login(event)
    }
}

impl From<RegisterEvent> for Event {
    fn from(event: RegisterEvent) -> Self {
        Event::Register(event)
    }
}

impl From<ProfileEvent> for Event {
    fn from(event: ProfileEvent) -> Self {
        Event::Profile(event)
    }
}

impl From<EditProfileEvent> for Event {
    fn from(event: EditProfileEvent) -> Self {
        Event::EditProfile(event)
    }
}

impl From<SettingsEvent> for Event {
    fn from(event: SettingsEvent) -> Self {
        Event::Settings(event)
    }
}

/// The mounted screen and its controller state
pub enum Screen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Profile(ProfileScreen),
    EditProfile(EditProfileScreen),
    Settings(SettingsScreen),
}

impl Screen {
    /// Build fresh controller state for an admitted route
    pub fn mount(route: Route, prefs: &Preferences) -> (Self, Vec<Effect>) {
        let prefs = prefs.clone();
        match route {
            Route::Root | Route::Login => (Screen::Login(LoginScreen::new(prefs)), Vec::new()),
            Route::Register => (Screen::Register(RegisterScreen::new()), Vec::new()),
            Route::Profile => (
                Screen::Profile(ProfileScreen::new(prefs, Utc::now())),
                Vec::new(),
            ),
            Route::EditProfile => (Screen::EditProfile(EditProfileScreen::new(prefs)), Vec::new()),
            Route::Settings => {
                let (screen, effects) = SettingsScreen::mount(prefs);
                (Screen::Settings(screen), effects)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Login(_) => "login",
            Screen::Register(_) => "register",
            Screen::Profile(_) => "profile",
            Screen::EditProfile(_) => "edit-profile",
            Screen::Settings(_) => "settings",
        }
    }

    /// Route an event to the mounted screen; events for other screens are dropped
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match (self, event) {
            (Screen::Login(s), Event::Login(e)) => s.handle(e),
            (Screen::Register(s), Event::Register(e)) => s.handle(e),
            (Screen::Profile(s), Event::Profile(e)) => s.handle(e),
            (Screen::EditProfile(s), Event::EditProfile(e)) => s.handle(e),
            (Screen::Settings(s), Event::Settings(e)) => s.handle(e),
            (screen, event) => {
                tracing::debug!(screen = screen.name(), event = ?event, "Event for unmounted screen dropped");
                Vec::new()
            }
        }
    }
}
