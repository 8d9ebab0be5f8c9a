//! Client-side validation for the ask-question, sign-up and log-in forms.
//!
//! Validation only; a form that passes is not transmitted anywhere.

use serde::Deserialize;

use crate::error::{Field, ValidationError};
use crate::password::PasswordReport;

fn require(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Title and description of a question being asked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl QuestionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, Field::Title)?;
        require(&self.content, Field::Content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// HTML checkboxes are omitted from the body when unticked.
    #[serde(default)]
    pub accept_terms: Option<String>,
}

impl SignUpForm {
    pub fn terms_accepted(&self) -> bool {
        self.accept_terms.is_some()
    }

    /// The confirmation must be non-empty and identical to the password.
    pub fn passwords_match(&self) -> bool {
        !self.confirm_password.is_empty() && self.password == self.confirm_password
    }

    pub fn password_report(&self) -> PasswordReport {
        PasswordReport::check(&self.password)
    }

    /// Required fields, then password policy, then confirmation, then terms.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.username, Field::Username)?;
        require(&self.email, Field::Email)?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField(Field::Password));
        }
        if self.confirm_password.is_empty() {
            return Err(ValidationError::MissingField(Field::ConfirmPassword));
        }
        let report = self.password_report();
        if !report.is_valid() {
            return Err(ValidationError::PasswordPolicyViolation(report.unmet()));
        }
        if !self.passwords_match() {
            return Err(ValidationError::PasswordMismatch);
        }
        if !self.terms_accepted() {
            return Err(ValidationError::TermsNotAccepted);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.email, Field::Email)?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField(Field::Password));
        }
        Ok(())
    }
}
