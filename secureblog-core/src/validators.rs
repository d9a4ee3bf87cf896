// SecureBlog - A security-minded blog client built with Rust
// Copyright (C) 2025 SecureBlog Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Client-side form rules for login and registration.
//!
//! Failures are reported as an [`ApiError`] carrying a field error map and no
//! status, so they are handled exactly like backend validation errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiError, FieldErrors};
use crate::models::{LoginRequest, RegisterPayload};

pub const PASSWORD_MIN_LENGTH: usize = 12;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 100;
pub const EMAIL_MAX_LENGTH: usize = 255;

const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        let mut errors = FieldErrors::new();

        if self.email.is_empty() {
            push(&mut errors, "email", "Email is required");
        } else if !EMAIL_RE.is_match(&self.email) {
            push(&mut errors, "email", "Invalid email format");
        }

        if self.password.is_empty() {
            push(&mut errors, "password", "Password is required");
        }

        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub consent: bool,
}

impl RegisterForm {
    /// Check every field and build the payload the backend expects
    pub fn validate(&self) -> Result<RegisterPayload, ApiError> {
        let mut errors = FieldErrors::new();

        let name_length = self.name.chars().count();
        if self.name.is_empty() {
            push(&mut errors, "name", "Name is required");
        } else if name_length < NAME_MIN_LENGTH {
            push(&mut errors, "name", "Name must contain at least 2 characters");
        } else if name_length > NAME_MAX_LENGTH {
            push(&mut errors, "name", "Name cannot exceed 100 characters");
        }

        if self.email.is_empty() {
            push(&mut errors, "email", "Email is required");
        } else {
            if !EMAIL_RE.is_match(&self.email) {
                push(&mut errors, "email", "Invalid email format");
            }
            if self.email.len() > EMAIL_MAX_LENGTH {
                push(&mut errors, "email", "Email cannot exceed 255 characters");
            }
        }

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            push(
                &mut errors,
                "password",
                "Password must contain at least 12 characters",
            );
        }
        if PasswordCriteria::of(&self.password).count() < 3 {
            push(
                &mut errors,
                "password",
                "Password must meet at least 3 of: uppercase, lowercase, digits, special characters",
            );
        }

        if self.confirm_password.is_empty() {
            push(
                &mut errors,
                "confirm_password",
                "Password confirmation is required",
            );
        } else if self.confirm_password != self.password {
            push(&mut errors, "confirm_password", "Passwords do not match");
        }

        if !self.consent {
            push(&mut errors, "consent", "You must accept the terms of use");
        }

        if !errors.is_empty() {
            return Err(ApiError::validation(errors));
        }

        Ok(RegisterPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            consent_given: self.consent,
        })
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

/// Which character classes a password uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordCriteria {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl PasswordCriteria {
    pub fn of(password: &str) -> Self {
        Self {
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    pub fn count(&self) -> usize {
        [self.uppercase, self.lowercase, self.digit, self.special]
            .iter()
            .filter(|met| **met)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    None,
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        match self {
            Strength::None => "",
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
        }
    }
}

/// Strength meter shown while a password is typed
pub fn password_strength(password: &str) -> Strength {
    let length = password.chars().count();
    let criteria = PasswordCriteria::of(password).count();

    if length >= PASSWORD_MIN_LENGTH && criteria >= 3 {
        Strength::Strong
    } else if length >= 8 && criteria >= 2 {
        Strength::Medium
    } else if length > 0 {
        Strength::Weak
    } else {
        Strength::None
    }
}
