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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name to the list of messages attached to it
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Status used for failures that never produced an HTTP response
pub const NETWORK_STATUS: u16 = 0;

const GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Broad category of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend could not be reached (status 0)
    Network,
    /// The backend answered with a failure status
    Http,
    /// A client-side form check failed before any request was made
    Validation,
    /// A client-side timer gave up waiting for the backend
    Timeout,
}

/// The single failure shape shared by the API client and its callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
            errors: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, Some(NETWORK_STATUS))
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(message, Some(status))
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(message, None)
    }

    pub fn validation(errors: FieldErrors) -> Self {
        let message = errors
            .values()
            .flat_map(|messages| messages.first())
            .next()
            .cloned()
            .unwrap_or_else(|| "Invalid form data".to_string());

        Self {
            message,
            status: None,
            errors: Some(errors),
        }
    }

    pub fn with_errors(mut self, errors: Option<FieldErrors>) -> Self {
        self.errors = errors;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            Some(NETWORK_STATUS) => ErrorKind::Network,
            Some(_) => ErrorKind::Http,
            None if self.errors.is_some() => ErrorKind::Validation,
            None => ErrorKind::Timeout,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// A 401 means the session is gone and the user has to log in again
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn first_field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .as_ref()?
            .get(field)?
            .first()
            .map(String::as_str)
    }

    /// Message suitable for showing to an end user.
    ///
    /// Outside development mode only HTTP and validation messages, which come
    /// from the backend or the form rules, are shown verbatim; anything else
    /// collapses to a generic retry prompt.
    pub fn display_message(&self, development_mode: bool) -> String {
        if development_mode {
            let mut out = self.to_string();
            if let Some(errors) = &self.errors {
                for (field, messages) in errors {
                    for message in messages {
                        out.push_str(&format!("\n  {}: {}", field, message));
                    }
                }
            }
            return out;
        }

        match self.kind() {
            ErrorKind::Http | ErrorKind::Validation => self.message.clone(),
            ErrorKind::Network => {
                "Unable to connect to the server. Check your connection and that the server is running."
                    .to_string()
            }
            ErrorKind::Timeout => GENERIC_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}
