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

use secureblog_core::models::{UpdateUserRequest, UserProfile};
use secureblog_core::ApiError;

use crate::client::{segment, ApiClient};

/// `/users` endpoints
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Admin only
    pub async fn list(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.client.get("/users").await
    }

    pub async fn get(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.client.get(&format!("/users/{}", segment(id))).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<UserProfile, ApiError> {
        self.client
            .patch(&format!("/users/{}", segment(id)), Some(request))
            .await
    }
}
