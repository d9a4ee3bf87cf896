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

use super::user::User;

/// Answer of `GET /auth/session`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub authenticated: bool,
}

impl Session {
    /// The session handed out whenever the real one cannot be determined
    pub fn anonymous() -> Self {
        Self {
            user: None,
            authenticated: false,
        }
    }

    pub fn for_user(user: User) -> Self {
        Self {
            user: Some(user),
            authenticated: true,
        }
    }

    /// Enforce that a user is present iff the session is authenticated.
    /// A missing user always wins: it turns the session anonymous.
    pub fn normalized(self) -> Self {
        match self.user {
            Some(user) if self.authenticated => Self::for_user(user),
            _ => Self::anonymous(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.user.is_some() == self.authenticated
    }
}
