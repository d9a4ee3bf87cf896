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

//! Terminal rendering. Every backend-provided string is escaped with
//! `sanitize_text` before it reaches stdout.

use secureblog_client::dashboard::UserDashboard;
use secureblog_core::dashboard::AdminDashboardStats;
use secureblog_core::models::{parse_timestamp, Comment, Post, Session, User};
use secureblog_core::sanitize::sanitize_text;

pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None if raw.is_empty() => "unknown date".to_string(),
        None => sanitize_text(raw),
    }
}

pub fn user_line(user: &User) -> String {
    format!(
        "{}  {} <{}>  {}",
        sanitize_text(&user.id),
        sanitize_text(&user.name),
        sanitize_text(&user.email),
        user.role.as_str()
    )
}

pub fn session_summary(session: &Session) -> String {
    match (&session.user, session.authenticated) {
        (Some(user), true) => format!("Authenticated as {}", user_line(user)),
        _ => "Not authenticated".to_string(),
    }
}

pub fn post_line(post: &Post) -> String {
    format!(
        "{}  {}  by {}  ({} comments, {})",
        sanitize_text(&post.id),
        sanitize_text(&post.title),
        sanitize_text(&post.author.name),
        post.comment_count(),
        format_date(&post.created_at)
    )
}

pub fn comment_line(comment: &Comment) -> String {
    format!(
        "[{}] {}  {}: {}",
        sanitize_text(&comment.id),
        format_date(&comment.created_at),
        sanitize_text(&comment.author.name),
        sanitize_text(&comment.content)
    )
}

pub fn post_detail(post: &Post) -> String {
    let mut out = String::new();
    out.push_str(&sanitize_text(&post.title));
    out.push('\n');
    out.push_str(&format!(
        "by {} on {}\n",
        sanitize_text(&post.author.name),
        format_date(&post.created_at)
    ));
    if let Some(image_url) = &post.image_url {
        out.push_str(&format!("image: {}\n", sanitize_text(image_url)));
    }
    out.push('\n');
    out.push_str(&sanitize_text(&post.content));
    out.push('\n');

    if post.comments.is_empty() {
        out.push_str("\nNo comments yet\n");
    } else {
        out.push_str(&format!("\nComments ({})\n", post.comment_count()));
        for comment in &post.comments {
            out.push_str("  ");
            out.push_str(&comment_line(comment));
            out.push('\n');
        }
    }

    out
}

pub fn user_dashboard(user: &User, dashboard: &UserDashboard) -> String {
    let mut out = format!(
        "Welcome, {}\nPosts: {}\nYour comments: {}\n",
        sanitize_text(&user.name),
        dashboard.stats.my_posts,
        dashboard.stats.my_comments
    );
    for post in &dashboard.posts {
        out.push_str("  ");
        out.push_str(&post_line(post));
        out.push('\n');
    }
    out
}

pub fn admin_dashboard(stats: &AdminDashboardStats) -> String {
    let mut out = format!(
        "Users: {}\nPosts: {}\nComments: {}\n",
        stats.total_users, stats.total_posts, stats.total_comments
    );

    if stats.recent_activity.is_empty() {
        out.push_str("No recent activity\n");
    } else {
        out.push_str("Recent activity\n");
        for activity in &stats.recent_activity {
            out.push_str(&format!(
                "  {}  {}\n",
                format_date(&activity.time),
                sanitize_text(&activity.message)
            ));
        }
    }

    out
}
