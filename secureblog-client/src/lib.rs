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

//! REST client for the SecureBlog backend.
//!
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use secureblog_client::ApiClient;
//!
//! let client = ApiClient::new("http://localhost:4000")?;
//! let posts = client.posts().list().await?;
//! println!("{} posts", posts.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod comments;
pub mod configuration;
pub mod dashboard;
pub mod guard;
pub mod posts;
pub mod users;

pub use auth::{check_auth, get_server_session, AuthApi};
pub use client::ApiClient;
pub use comments::CommentsApi;
pub use configuration::Configuration;
pub use guard::{check_route, recheck};
pub use posts::PostsApi;
pub use users::UsersApi;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(self)
    }

    pub fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }
}
