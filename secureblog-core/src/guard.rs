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

//! Route protection as a small state machine.
//!
//! A guard starts in [`GuardState::Checking`] and is resolved with the
//! outcome of a session fetch. The guard never navigates by itself: callers
//! read the state and perform the redirect.

use tracing::warn;

use crate::error::ApiError;
use crate::models::{is_admin, Session, User};

pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequirements {
    pub require_auth: bool,
    pub require_admin: bool,
}

impl Default for RouteRequirements {
    fn default() -> Self {
        Self::authenticated()
    }
}

impl RouteRequirements {
    pub fn public() -> Self {
        Self {
            require_auth: false,
            require_admin: false,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            require_admin: false,
        }
    }

    pub fn admin() -> Self {
        Self {
            require_auth: true,
            require_admin: true,
        }
    }
}

/// Outcome of checking a session against route requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectLogin,
    RedirectHome,
}

impl AccessDecision {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectLogin => Some(LOGIN_PATH),
            AccessDecision::RedirectHome => Some(HOME_PATH),
        }
    }
}

/// Decide whether a session may see a route
pub fn decide(requirements: RouteRequirements, session: &Session) -> AccessDecision {
    let user = session.user.as_ref().filter(|_| session.authenticated);

    if requirements.require_auth && user.is_none() {
        return AccessDecision::RedirectLogin;
    }

    if requirements.require_admin && !is_admin(user) {
        return AccessDecision::RedirectHome;
    }

    AccessDecision::Allow
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized(Option<User>),
    RedirectLogin,
    RedirectHome,
}

impl GuardState {
    /// Children are rendered only once the guard is authorized
    pub fn should_render(&self) -> bool {
        matches!(self, GuardState::Authorized(_))
    }

    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            GuardState::RedirectLogin => Some(LOGIN_PATH),
            GuardState::RedirectHome => Some(HOME_PATH),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirements: RouteRequirements,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(requirements: RouteRequirements) -> Self {
        Self {
            requirements,
            state: GuardState::Checking,
        }
    }

    pub fn requirements(&self) -> RouteRequirements {
        self.requirements
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Feed the result of a session fetch into the guard.
    ///
    /// A 401 on a route that needs authentication means the session expired.
    /// Every other error leaves the state untouched so that a flaky backend
    /// does not log the user out; the caller may resolve again later.
    pub fn resolve(&mut self, outcome: Result<Session, ApiError>) -> &GuardState {
        match outcome {
            Ok(session) => {
                let session = session.normalized();
                self.state = match decide(self.requirements, &session) {
                    AccessDecision::Allow => GuardState::Authorized(session.user),
                    AccessDecision::RedirectLogin => GuardState::RedirectLogin,
                    AccessDecision::RedirectHome => GuardState::RedirectHome,
                };
            }
            Err(error) if self.requirements.require_auth && error.is_unauthorized() => {
                self.state = GuardState::RedirectLogin;
            }
            Err(error) => {
                warn!(
                    status = ?error.status,
                    message = %error.message,
                    "Session check failed, keeping guard state"
                );
            }
        }

        &self.state
    }
}
