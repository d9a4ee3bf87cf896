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
    Comment, CommentAuthor, CreateCommentRequest, MessageResponse, UNKNOWN_AUTHOR_NAME,
};
use secureblog_core::sanitize::sanitize_comment;
use secureblog_core::ApiError;
use serde::Deserialize;

use crate::client::{segment, ApiClient};

/// `/posts/:postId/comments` endpoints
#[derive(Debug, Clone, Copy)]
pub struct CommentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, post_id: &str, id: &str) -> Result<Comment, ApiError> {
        self.client
            .get(&format!("/posts/{}/comments/{}", segment(post_id), segment(id)))
            .await
    }

    /// Create a comment and return it in a consistent shape whatever the
    /// backend included about the author.
    ///
    /// The content is passed through the comment sanitizer; length rules
    /// belong to [`CommentDraft`](secureblog_core::models::CommentDraft).
    pub async fn create(
        &self,
        post_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, ApiError> {
        let request = CreateCommentRequest {
            content: sanitize_comment(&request.content),
        };
        let raw: RawComment = self
            .client
            .post(&format!("/posts/{}/comments", segment(post_id)), Some(&request))
            .await?;

        Ok(raw.normalize(post_id))
    }

    pub async fn delete(&self, post_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .delete(&format!("/posts/{}/comments/{}", segment(post_id), segment(id)))
            .await
    }
}

/// Comment as the backend may send it after creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComment {
    id: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    author: Option<RawAuthor>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl RawComment {
    fn normalize(self, post_id: &str) -> Comment {
        let (nested_id, nested_name) = match self.author {
            Some(author) => (non_empty(author.id), non_empty(author.name)),
            None => (None, None),
        };
        let flat_id = non_empty(self.author_id);

        let author_id = flat_id.clone().or_else(|| nested_id.clone()).unwrap_or_default();
        let author = CommentAuthor {
            id: nested_id.or(flat_id).unwrap_or_default(),
            name: nested_name.unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string()),
        };

        let created_at = self.created_at.unwrap_or_default();
        let updated_at = non_empty(self.updated_at).unwrap_or_else(|| created_at.clone());

        Comment {
            id: self.id,
            content: self.content,
            author_id,
            author,
            post_id: Some(post_id.to_string()),
            created_at,
            updated_at,
        }
    }
}
