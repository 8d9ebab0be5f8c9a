//! Sign-up password policy. Each requirement is checked on its own so the
//! form can show a live checklist.

use serde::Serialize;

/// Characters that satisfy [`PasswordRequirement::SpecialCharacter`].
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

pub const MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    SpecialCharacter,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        Self::MinLength,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::SpecialCharacter,
    ];

    pub fn is_met(self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= MIN_LENGTH,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::SpecialCharacter => password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MinLength => "At least 8 characters",
            Self::Uppercase => "Contains uppercase letter",
            Self::Lowercase => "Contains lowercase letter",
            Self::Digit => "Contains number",
            Self::SpecialCharacter => "Contains special character",
        }
    }
}

/// Outcome of every requirement for one password, in policy order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReport {
    checks: [(PasswordRequirement, bool); 5],
}

impl PasswordReport {
    pub fn check(password: &str) -> Self {
        Self {
            checks: PasswordRequirement::ALL.map(|req| (req, req.is_met(password))),
        }
    }

    pub fn checks(&self) -> &[(PasswordRequirement, bool)] {
        &self.checks
    }

    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|(_, met)| *met)
    }

    pub fn unmet(&self) -> Vec<PasswordRequirement> {
        self.checks
            .iter()
            .filter(|(_, met)| !met)
            .map(|(req, _)| *req)
            .collect()
    }
}
