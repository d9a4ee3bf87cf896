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

use crate::error::{ApiError, FieldErrors};
use crate::sanitize::sanitize_comment;

/// Fallback display name when the backend omits the comment author's name
pub const UNKNOWN_AUTHOR_NAME: &str = "Utilisateur";

pub const COMMENT_MIN_LENGTH: usize = 3;
pub const COMMENT_MAX_LENGTH: usize = 800;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub author: CommentAuthor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Body of `POST /posts/:postId/comments`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// A comment that passed the form rules (trimmed, 3 to 800 characters)
/// and the comment sanitizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    content: String,
}

impl CommentDraft {
    pub fn new(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        let problem = if trimmed.is_empty() {
            Some("Please write a comment before publishing.".to_string())
        } else if length < COMMENT_MIN_LENGTH {
            Some(format!(
                "Your comment must contain at least {} characters.",
                COMMENT_MIN_LENGTH
            ))
        } else if length > COMMENT_MAX_LENGTH {
            Some(format!(
                "Your comment cannot exceed {} characters.",
                COMMENT_MAX_LENGTH
            ))
        } else {
            None
        };

        if let Some(message) = problem {
            let mut errors = FieldErrors::new();
            errors.insert("content".to_string(), vec![message]);
            return Err(ApiError::validation(errors));
        }

        Ok(Self {
            content: sanitize_comment(trimmed),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_request(self) -> CreateCommentRequest {
        CreateCommentRequest {
            content: self.content,
        }
    }
}
