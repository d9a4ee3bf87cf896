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

use secureblog_core::models::{
    AuthResponse, LoginRequest, MessageResponse, RegisterPayload, Session, User,
};
use secureblog_core::ApiError;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::ApiClient;

const REGISTER_TIMEOUT_MESSAGE: &str =
    "The request took too long. Check your connection.";

/// `/auth/*` endpoints
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.client.post("/auth/login", Some(credentials)).await?;
        info!("Logged in as {}", credentials.email);
        Ok(response)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<MessageResponse, ApiError> {
        self.client.post("/auth/register", Some(payload)).await
    }

    /// Register, giving up once `limit` has elapsed
    pub async fn register_with_timeout(
        &self,
        payload: &RegisterPayload,
        limit: Duration,
    ) -> Result<MessageResponse, ApiError> {
        match tokio::time::timeout(limit, self.register(payload)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Registration did not complete within {:?}", limit);
                Err(ApiError::timeout(REGISTER_TIMEOUT_MESSAGE))
            }
        }
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .post::<MessageResponse, ()>("/auth/logout", None)
            .await?;
        info!("Logged out");
        Ok(response)
    }

    /// Current session; a network failure yields an anonymous session.
    ///
    /// Connectivity blips must not look like a logout, so only status 0 is
    /// swallowed; HTTP errors still propagate.
    pub async fn session(&self) -> Result<Session, ApiError> {
        match self.fetch_session().await {
            Err(error) if error.is_network() => {
                warn!("Session check failed on the network, treating as anonymous: {}", error);
                Ok(Session::anonymous())
            }
            other => other,
        }
    }

    /// Current session with every failure propagated
    pub async fn fetch_session(&self) -> Result<Session, ApiError> {
        let session: Session = self.client.get("/auth/session").await?;
        Ok(session.normalized())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }
}

/// Session lookup that never fails: any error gives an anonymous session
pub async fn get_server_session(client: &ApiClient) -> Session {
    client
        .auth()
        .session()
        .await
        .unwrap_or_else(|_| Session::anonymous())
}

/// The logged-in user, or `None` when there is none or the lookup failed
pub async fn check_auth(client: &ApiClient) -> Option<User> {
    client
        .auth()
        .session()
        .await
        .ok()
        .and_then(|session| session.user)
}
