// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules for customer and staff accounts.

use thiserror::Error;

/// bcrypt ignores everything past this many bytes.
pub const BCRYPT_MAX_BYTES: usize = 72;

/// The kinds of character a password is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    const ALL: [Self; 4] = [Self::Uppercase, Self::Lowercase, Self::Digit, Self::Symbol];

    fn of(c: char) -> Option<Self> {
        if c.is_uppercase() {
            Some(Self::Uppercase)
        } else if c.is_lowercase() {
            Some(Self::Lowercase)
        } else if c.is_ascii_digit() {
            Some(Self::Digit)
        } else if c.is_whitespace() {
            None
        } else {
            Some(Self::Symbol)
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase letter",
            Self::Lowercase => "lowercase letter",
            Self::Digit => "digit",
            Self::Symbol => "symbol",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Passwords do not match")]
    ConfirmationMismatch,

    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    #[error("Password must be at most {max_bytes} bytes long")]
    TooLong { max_bytes: usize },

    #[error("Password must mix at least {required} kinds of character (try adding: {suggestion})")]
    TooFewCharacterClasses {
        required: usize,
        found: usize,
        suggestion: &'static str,
    },

    /// The password is the account's own email or name.
    #[error("Password must not be the same as your {field}")]
    SameAsAccountDetail { field: &'static str },
}

/// The values a new password is checked against.
#[derive(Debug, Clone, Copy)]
pub struct NewPassword<'a> {
    pub password: &'a str,
    pub confirmation: &'a str,
    pub email: &'a str,
    pub name: &'a str,
}

/// Length and character-mix requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// How many of the four character classes must appear.
    pub min_classes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_classes: 2,
        }
    }
}

impl PasswordPolicy {
    /// Checks a new password, reporting the first rule it breaks.
    ///
    /// Comparison against the email and name ignores case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first `PasswordPolicyError` that applies.
    pub fn validate(&self, candidate: &NewPassword<'_>) -> Result<(), PasswordPolicyError> {
        let password: &str = candidate.password;
        if password != candidate.confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }
        if password.len() > BCRYPT_MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max_bytes: BCRYPT_MAX_BYTES,
            });
        }

        let present: Vec<CharacterClass> = Self::classes_in(password);
        if present.len() < self.min_classes {
            let suggestion: &'static str = CharacterClass::ALL
                .into_iter()
                .find(|class| !present.contains(class))
                .map_or("symbol", CharacterClass::as_str);
            return Err(PasswordPolicyError::TooFewCharacterClasses {
                required: self.min_classes,
                found: present.len(),
                suggestion,
            });
        }

        let folded: String = password.trim().to_lowercase();
        for (field, value) in [("email", candidate.email), ("name", candidate.name)] {
            if folded == value.trim().to_lowercase() {
                return Err(PasswordPolicyError::SameAsAccountDetail { field });
            }
        }

        Ok(())
    }

    fn classes_in(password: &str) -> Vec<CharacterClass> {
        let mut present: Vec<CharacterClass> = Vec::with_capacity(CharacterClass::ALL.len());
        for class in password.chars().filter_map(CharacterClass::of) {
            if !present.contains(&class) {
                present.push(class);
            }
        }
        present
    }
}
