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

//! Aggregates shown on the user and admin dashboards

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{parse_timestamp, Post, User};

const RECENT_ACTIVITY_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDashboardStats {
    pub my_posts: usize,
    pub my_comments: usize,
}

impl UserDashboardStats {
    pub fn compute(user_id: &str, posts: &[Post]) -> Self {
        let my_posts = posts.iter().filter(|post| post.author_id == user_id).count();
        let my_comments = posts
            .iter()
            .flat_map(|post| post.comments.iter())
            .filter(|comment| comment.author_id == user_id)
            .count();

        Self {
            my_posts,
            my_comments,
        }
    }
}

/// The posts written by `user_id`
pub fn posts_by_author<'a>(user_id: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| post.author_id == user_id)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: &'static str,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminDashboardStats {
    pub total_users: usize,
    pub total_posts: usize,
    pub total_comments: usize,
    pub recent_activity: Vec<Activity>,
}

impl AdminDashboardStats {
    pub fn compute(users: &[User], posts: &[Post]) -> Self {
        Self {
            total_users: users.len(),
            total_posts: posts.len(),
            total_comments: posts.iter().map(Post::comment_count).sum(),
            recent_activity: recent_activity(posts),
        }
    }
}

/// Newest posts first; posts with unparsable dates go last
fn recent_activity(posts: &[Post]) -> Vec<Activity> {
    let mut dated: Vec<(Option<DateTime<Utc>>, &Post)> = posts
        .iter()
        .map(|post| (parse_timestamp(&post.created_at), post))
        .collect();

    dated.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    dated
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|(_, post)| Activity {
            kind: "post",
            message: format!("New post: \"{}\"", post.title),
            time: post.created_at.clone(),
        })
        .collect()
}
