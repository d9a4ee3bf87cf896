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

use secureblog_core::dashboard::{posts_by_author, AdminDashboardStats, UserDashboardStats};
use secureblog_core::models::{Post, User};
use secureblog_core::ApiError;

use crate::client::ApiClient;

#[derive(Debug, Clone)]
pub struct UserDashboard {
    pub posts: Vec<Post>,
    pub stats: UserDashboardStats,
}

/// Posts written by `user` and their activity counters
pub async fn load_user_dashboard(client: &ApiClient, user: &User) -> Result<UserDashboard, ApiError> {
    let all_posts = client.posts().list().await?;
    let stats = UserDashboardStats::compute(&user.id, &all_posts);
    let posts = posts_by_author(&user.id, &all_posts)
        .into_iter()
        .cloned()
        .collect();

    Ok(UserDashboard { posts, stats })
}

/// Site-wide counters; users and posts are fetched concurrently
pub async fn load_admin_dashboard(client: &ApiClient) -> Result<AdminDashboardStats, ApiError> {
    let users = client.users();
    let posts = client.posts();
    let (users, posts) = tokio::try_join!(users.list(), posts.list())?;
    Ok(AdminDashboardStats::compute(&users, &posts))
}
