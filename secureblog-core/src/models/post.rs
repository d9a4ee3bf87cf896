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

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::comment::Comment;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A blog post (called an article in the interface)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_id: String,
    pub author: PostAuthor,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Post {
    /// Verify the denormalized fields agree with each other
    pub fn check_integrity(&self) -> Result<()> {
        if self.author_id != self.author.id {
            bail!(
                "Post {} has authorId {} but embedded author {}",
                self.id,
                self.author_id,
                self.author.id
            );
        }

        for comment in &self.comments {
            if let Some(post_id) = &comment.post_id {
                if post_id != &self.id {
                    bail!(
                        "Comment {} belongs to post {} but is embedded in post {}",
                        comment.id,
                        post_id,
                        self.id
                    );
                }
            }
        }

        Ok(())
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `PATCH /posts/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
