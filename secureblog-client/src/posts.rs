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

use secureblog_core::models::{CreatePostRequest, MessageResponse, Post, UpdatePostRequest};
use secureblog_core::ApiError;

use crate::client::{segment, ApiClient};

/// `/posts` endpoints.
///
/// Ownership of updates and deletes is enforced by the backend; callers
/// should still check `can_access_resource` before offering the action.
#[derive(Debug, Clone, Copy)]
pub struct PostsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        self.client.get("/posts").await
    }

    /// A single post with its comments
    pub async fn get(&self, id: &str) -> Result<Post, ApiError> {
        self.client.get(&format!("/posts/{}", segment(id))).await
    }

    pub async fn create(&self, request: &CreatePostRequest) -> Result<Post, ApiError> {
        self.client.post("/posts", Some(request)).await
    }

    pub async fn update(&self, id: &str, request: &UpdatePostRequest) -> Result<Post, ApiError> {
        self.client
            .patch(&format!("/posts/{}", segment(id)), Some(request))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.client.delete(&format!("/posts/{}", segment(id))).await
    }
}
