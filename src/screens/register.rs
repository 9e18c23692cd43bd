//! Registration screen
//!
//! ```text
//! Idle --Submit--> validate --invalid--> Idle (error shown)
//!                     └--valid--> Submitting --Completed(Err)--> Idle (error shown)
//!                                      └-----Completed(Ok)--> Succeeded (form cleared)
//! ```
//!
//! Success never navigates away.

use crate::auth::{AuthError, RegisterRequest, RegisterResponse};
use crate::screens::validation::{is_basic_email, FieldError, Validated};
use crate::screens::{AuthCall, Effect};
use crate::navigation::Route;

/// Minimum password length in UTF-16 code units, the unit browsers count in
pub const MIN_PASSWORD_LEN: usize = 6;

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub const MSG_FILL_ALL: &str = "Please fill in all fields";
pub const MSG_BAD_EMAIL: &str = "Invalid email format";
pub const MSG_SHORT_PASSWORD: &str = "Password must be at least 6 characters";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_BAD_TELEGRAM: &str = "Telegram must start with @ and contain a username";
pub const MSG_REGISTERED: &str =
    "Registration successful! Check your email to confirm your account.";
pub const MSG_REGISTER_FAILED: &str = "Registration failed";
pub const MSG_REGISTER_ERROR: &str = "An error occurred during registration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Telegram,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub telegram: String,
}

impl RegisterForm {
    pub fn set(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Username => self.username = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
            RegisterField::Telegram => self.telegram = value,
        }
    }

    /// Run the checks in order; the first failure wins
    pub fn validate(&self) -> Validated<RegisterRequest, RegisterField> {
        let fields = [
            (RegisterField::Email, &self.email),
            (RegisterField::Username, &self.username),
            (RegisterField::Password, &self.password),
            (RegisterField::ConfirmPassword, &self.confirm_password),
            (RegisterField::Telegram, &self.telegram),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| v.is_empty()) {
            return Validated::Invalid(FieldError::new(*field, MSG_FILL_ALL));
        }

        if !is_basic_email(&self.email) {
            return Validated::Invalid(FieldError::new(RegisterField::Email, MSG_BAD_EMAIL));
        }

        if utf16_len(&self.password) < MIN_PASSWORD_LEN {
            return Validated::Invalid(FieldError::new(
                RegisterField::Password,
                MSG_SHORT_PASSWORD,
            ));
        }

        if self.password != self.confirm_password {
            return Validated::Invalid(FieldError::new(
                RegisterField::ConfirmPassword,
                MSG_PASSWORD_MISMATCH,
            ));
        }

        if !self.telegram.starts_with('@') || utf16_len(&self.telegram) < 2 {
            return Validated::Invalid(FieldError::new(RegisterField::Telegram, MSG_BAD_TELEGRAM));
        }

        Validated::Valid(RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            telegram: self.telegram.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug)]
pub enum RegisterEvent {
    FieldChanged(RegisterField, String),
    Submit,
    /// The registration request finished
    Completed(Result<RegisterResponse, AuthError>),
    GoToLogin,
}

pub struct RegisterScreen {
    form: RegisterForm,
    status: RegisterStatus,
    error: Option<FieldError<Option<RegisterField>>>,
    success: Option<String>,
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            form: RegisterForm::default(),
            status: RegisterStatus::Idle,
            error: None,
            success: None,
        }
    }

    pub fn form(&self) -> &RegisterForm {
        &self.form
    }

    pub fn status(&self) -> RegisterStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Field the current error belongs to; `None` for server errors
    pub fn error_field(&self) -> Option<RegisterField> {
        self.error.as_ref().and_then(|e| e.field)
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.status != RegisterStatus::Submitting
    }

    pub fn handle(&mut self, event: RegisterEvent) -> Vec<Effect> {
        match event {
            RegisterEvent::FieldChanged(field, value) => {
                self.form.set(field, value);
                if self.status == RegisterStatus::Succeeded {
                    self.status = RegisterStatus::Idle;
                }
                Vec::new()
            }
            RegisterEvent::Submit => self.submit(),
            RegisterEvent::Completed(result) => self.complete(result),
            RegisterEvent::GoToLogin => vec![Effect::Navigate(Route::Login)],
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.can_submit() {
            tracing::debug!("Registration already in flight, ignoring submit");
            return Vec::new();
        }

        match self.form.validate() {
            Validated::Invalid(err) => {
                tracing::debug!(field = ?err.field, "Registration form rejected locally");
                self.status = RegisterStatus::Idle;
                self.error = Some(FieldError::new(Some(err.field), err.message));
                Vec::new()
            }
            Validated::Valid(request) => {
                self.status = RegisterStatus::Submitting;
                self.error = None;
                self.success = None;
                tracing::debug!(username = %request.username, "Registration submitted");
                vec![Effect::Request(AuthCall::Register(request))]
            }
        }
    }

    fn complete(&mut self, result: Result<RegisterResponse, AuthError>) -> Vec<Effect> {
        if self.status != RegisterStatus::Submitting {
            tracing::debug!("Dropping registration completion with no request in flight");
            return Vec::new();
        }

        match result {
            Ok(_) => {
                tracing::info!("Registration succeeded");
                self.status = RegisterStatus::Succeeded;
                self.form = RegisterForm::default();
                self.success = Some(MSG_REGISTERED.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Registration failed");
                self.status = RegisterStatus::Idle;
                self.error = Some(FieldError::new(
                    None,
                    e.user_message(MSG_REGISTER_FAILED, MSG_REGISTER_ERROR),
                ));
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            email: "a@b.com".to_string(),
            username: "u".to_string(),
            password: "123456".to_string(),
            confirm_password: "123456".to_string(),
            telegram: "@u".to_string(),
        }
    }

    fn filled_screen(form: RegisterForm) -> RegisterScreen {
        let mut screen = RegisterScreen::new();
        for (field, value) in [
            (RegisterField::Email, form.email),
            (RegisterField::Username, form.username),
            (RegisterField::Password, form.password),
            (RegisterField::ConfirmPassword, form.confirm_password),
            (RegisterField::Telegram, form.telegram),
        ] {
            screen.handle(RegisterEvent::FieldChanged(field, value));
        }
        screen
    }

    fn rejection(form: RegisterForm) -> FieldError<RegisterField> {
        match form.validate() {
            Validated::Invalid(err) => err,
            Validated::Valid(req) => panic!("expected rejection, got {req:?}"),
        }
    }

    #[test]
    fn test_valid_form_issues_one_request() {
        let mut screen = filled_screen(valid_form());
        let effects = screen.handle(RegisterEvent::Submit);

        assert_eq!(
            effects,
            vec![Effect::Request(AuthCall::Register(RegisterRequest {
                username: "u".to_string(),
                email: "a@b.com".to_string(),
                password: "123456".to_string(),
                telegram: "@u".to_string(),
            }))]
        );
        assert_eq!(screen.status(), RegisterStatus::Submitting);
        assert!(screen.handle(RegisterEvent::Submit).is_empty());
    }

    #[test]
    fn test_short_password_rejected_without_request() {
        let mut form = valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();

        let mut screen = filled_screen(form);
        assert!(screen.handle(RegisterEvent::Submit).is_empty());
        assert_eq!(screen.error(), Some(MSG_SHORT_PASSWORD));
        assert_eq!(screen.error_field(), Some(RegisterField::Password));
        assert_eq!(screen.status(), RegisterStatus::Idle);
    }

    #[test]
    fn test_validation_order() {
        // Empty field beats every other problem
        let mut form = valid_form();
        form.username.clear();
        form.email = "nope".to_string();
        assert_eq!(rejection(form).message, MSG_FILL_ALL);

        // Email format beats password length
        let mut form = valid_form();
        form.email = "nope".to_string();
        form.password = "1".to_string();
        assert_eq!(rejection(form).message, MSG_BAD_EMAIL);

        // Length beats mismatch
        let mut form = valid_form();
        form.password = "12345".to_string();
        assert_eq!(rejection(form).message, MSG_SHORT_PASSWORD);

        // Mismatch beats telegram
        let mut form = valid_form();
        form.confirm_password = "654321".to_string();
        form.telegram = "u".to_string();
        assert_eq!(rejection(form).message, MSG_PASSWORD_MISMATCH);
    }

    #[test]
    fn test_telegram_handle_rules() {
        let mut form = valid_form();
        form.telegram = "@".to_string();
        assert_eq!(rejection(form).field, RegisterField::Telegram);

        let mut form = valid_form();
        form.telegram = "handle".to_string();
        assert_eq!(rejection(form).message, MSG_BAD_TELEGRAM);

        let mut form = valid_form();
        form.telegram = "@ab".to_string();
        assert!(form.validate().is_valid());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // Three astral-plane characters are six UTF-16 units
        let mut form = valid_form();
        form.password = "😀😀😀".to_string();
        form.confirm_password = "😀😀😀".to_string();
        assert!(form.validate().is_valid());

        let mut form = valid_form();
        form.password = "ééééé".to_string();
        form.confirm_password = "ééééé".to_string();
        assert_eq!(rejection(form).message, MSG_SHORT_PASSWORD);
    }

    #[test]
    fn test_success_clears_form_and_stays() {
        let mut screen = filled_screen(valid_form());
        screen.handle(RegisterEvent::Submit);

        let effects = screen.handle(RegisterEvent::Completed(Ok(serde_json::json!({"id": 7}))));

        assert!(effects.is_empty());
        assert_eq!(screen.status(), RegisterStatus::Succeeded);
        assert_eq!(screen.form(), &RegisterForm::default());
        assert_eq!(screen.success(), Some(MSG_REGISTERED));
        assert_eq!(screen.error(), None);
    }

    #[test]
    fn test_server_error_shown() {
        let mut screen = filled_screen(valid_form());
        screen.handle(RegisterEvent::Submit);

        screen.handle(RegisterEvent::Completed(Err(AuthError::Rejected {
            status: 400,
            detail: Some("Username already registered".to_string()),
        })));

        assert_eq!(screen.status(), RegisterStatus::Idle);
        assert_eq!(screen.error(), Some("Username already registered"));
        assert_eq!(screen.error_field(), None);
        assert_eq!(screen.form(), &valid_form());
    }

    #[test]
    fn test_transport_error_fallback() {
        let mut screen = filled_screen(valid_form());
        screen.handle(RegisterEvent::Submit);
        screen.handle(RegisterEvent::Completed(Err(AuthError::Timeout)));
        assert_eq!(screen.error(), Some(MSG_REGISTER_ERROR));
    }
}
