//! # Errors
//!
//! `ValidationError` covers everything a form can reject. `AppError` is the
//! error type for every other sk-core operation.

use std::fmt;

use thiserror::Error;

use crate::password::PasswordRequirement;
use crate::tags::MAX_TAGS;

/// A user-editable input, named in `MissingField` rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Tag,
    Answer,
    Comment,
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "description",
            Self::Tag => "tag",
            Self::Answer => "answer",
            Self::Comment => "comment",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "password confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client-side validation failures. Handled by rejecting the action; never
/// retried or escalated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    /// Carries every requirement the password failed, in policy order.
    #[error("password requirements not met ({} unmet)", .0.len())]
    PasswordPolicyViolation(Vec<PasswordRequirement>),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("at most {} tags are allowed", MAX_TAGS)]
    TagLimitExceeded,

    #[error("tag `{0}` is already present")]
    DuplicateTag(String),
}

impl ValidationError {
    /// Title and description of the destructive toast raised for this error.
    pub fn toast(&self) -> (&'static str, String) {
        match self {
            Self::MissingField(Field::Title | Field::Content) => {
                ("Error", "Please fill in both title and content".to_string())
            }
            Self::MissingField(field) => ("Error", format!("Please fill in the {field} field")),
            Self::PasswordPolicyViolation(_) => (
                "Password requirements not met",
                "Please ensure your password meets all requirements.".to_string(),
            ),
            Self::PasswordMismatch => (
                "Passwords don't match",
                "Please ensure both passwords are identical.".to_string(),
            ),
            Self::TermsNotAccepted => (
                "Terms acceptance required",
                "Please accept the terms and conditions to continue.".to_string(),
            ),
            Self::TagLimitExceeded => ("Error", format!("You can add up to {MAX_TAGS} tags")),
            Self::DuplicateTag(tag) => ("Error", format!("Tag \"{tag}\" is already added")),
        }
    }
}

/// The primary error type for all sk-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Question, Answer, Notification)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The viewer may not perform the action (e.g., accepting an answer on
    /// someone else's question)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A port failed (e.g., the data source could not be read)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// A specialized Result type for StackIt logic.
pub type Result<T> = std::result::Result<T, AppError>;
