//! Login screen
//!
//! ```text
//! Idle --Submit--> Submitting --Completed(Ok)--> Succeeded (reload "/")
//!                       └------Completed(Err)--> Idle (error shown, form kept)
//! ```

use crate::auth::{AuthError, LoginRequest, TokenResponse};
use crate::navigation::Route;
use crate::screens::validation::{FieldError, Validated, MSG_REQUIRED};
use crate::screens::{AuthCall, Effect, MSG_SAVE_FAILED};
use crate::session::AuthSession;
use crate::store::Preferences;

pub const MSG_LOGIN_FAILED: &str = "Login failed";
pub const MSG_LOGIN_ERROR: &str = "An error occurred during login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Identifier,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email or username
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Identifier => self.identifier = value,
            LoginField::Password => self.password = value,
        }
    }

    /// Both fields are required
    pub fn validate(&self) -> Validated<LoginRequest, LoginField> {
        if self.identifier.is_empty() {
            return Validated::Invalid(FieldError::new(LoginField::Identifier, MSG_REQUIRED));
        }
        if self.password.is_empty() {
            return Validated::Invalid(FieldError::new(LoginField::Password, MSG_REQUIRED));
        }
        Validated::Valid(LoginRequest {
            identifier: self.identifier.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug)]
pub enum LoginEvent {
    FieldChanged(LoginField, String),
    Submit,
    /// The login request finished
    Completed(Result<TokenResponse, AuthError>),
    GoToRegister,
}

pub struct LoginScreen {
    prefs: Preferences,
    form: LoginForm,
    status: LoginStatus,
    error: Option<String>,
}

impl LoginScreen {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            form: LoginForm::default(),
            status: LoginStatus::Idle,
            error: None,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn status(&self) -> LoginStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The submit control is disabled while a request is outstanding
    pub fn can_submit(&self) -> bool {
        self.status != LoginStatus::Submitting
    }

    pub fn handle(&mut self, event: LoginEvent) -> Vec<Effect> {
        match event {
            LoginEvent::FieldChanged(field, value) => {
                self.form.set(field, value);
                Vec::new()
            }
            LoginEvent::Submit => self.submit(),
            LoginEvent::Completed(result) => self.complete(result),
            LoginEvent::GoToRegister => vec![Effect::Navigate(Route::Register)],
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            tracing::debug!("Login already in flight, ignoring submit");
            return Vec::new();
        }

        match self.form.validate() {
            Validated::Invalid(err) => {
                self.error = Some(err.message);
                Vec::new()
            }
            Validated::Valid(request) => {
                self.status = LoginStatus::Submitting;
                self.error = None;
                tracing::debug!(identifier = %request.identifier, "Login submitted");
                vec![Effect::Request(AuthCall::Login(request))]
            }
        }
    }

    fn complete(&mut self, result: Result<TokenResponse, AuthError>) -> Vec<Effect> {
        if self.status != LoginStatus::Submitting {
            tracing::debug!("Dropping login completion with no request in flight");
            return Vec::new();
        }

        match result {
            Ok(token) => match AuthSession::start(&self.prefs, &token.access_token) {
                Ok(_) => {
                    self.status = LoginStatus::Succeeded;
                    tracing::info!("Login succeeded");
                    vec![Effect::Reload(Route::Root)]
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to store access token");
                    self.status = LoginStatus::Idle;
                    self.error = Some(MSG_SAVE_FAILED.to_string());
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.status = LoginStatus::Idle;
                self.error = Some(e.user_message(MSG_LOGIN_FAILED, MSG_LOGIN_ERROR));
                Vec::new()
            }
        }
    }
}
