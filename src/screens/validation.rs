//! Form validation primitives

use regex::Regex;
use std::sync::OnceLock;

pub const MSG_REQUIRED: &str = "Please fill out this field";
pub const MSG_EMAIL: &str = "Please enter a valid email address";
pub const MSG_URL: &str = "Please enter a URL";

/// Result of validating a typed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T, F> {
    Valid(T),
    Invalid(FieldError<F>),
}

impl<T, F> Validated<T, F> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }
}

/// First failing check of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError<F> {
    pub field: F,
    pub message: String,
}

impl<F> FieldError<F> {
    pub fn new(field: F, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Loose `something@something.something` check
pub fn is_basic_email(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("static regex"))
        .is_match(value)
}

/// Email syntax as accepted by an `<input type="email">` field
pub fn is_valid_email(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )
            .expect("static regex")
        })
        .is_match(value)
}

/// Absolute URL as accepted by an `<input type="url">` field
pub fn is_absolute_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok()
}
