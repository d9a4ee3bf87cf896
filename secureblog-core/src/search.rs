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

use crate::models::Post;

/// Keep posts whose title or content contains `query`, ignoring case
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostAuthor;

    fn post(id: &str, title: &str, content: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            image_url: None,
            author_id: "u1".to_string(),
            author: PostAuthor {
                id: "u1".to_string(),
                name: "Alice".to_string(),
                email: String::new(),
            },
            comments: vec![],
            created_at: "2024-01-01".to_string(),
            updated_at: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_filter_matches_title_and_content() {
        let posts = vec![
            post("1", "Rust ownership", "Borrowing explained"),
            post("2", "CSRF tokens", "Why RUST servers check them"),
            post("3", "Gardening", "Tomatoes"),
        ];

        let ids: Vec<&str> = filter_posts(&posts, "rust")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let posts = vec![post("1", "A", "B"), post("2", "C", "D")];
        assert_eq!(filter_posts(&posts, "").len(), 2);
        assert_eq!(filter_posts(&posts, "   ").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let posts = vec![post("1", "A", "B")];
        assert!(filter_posts(&posts, "zzz").is_empty());
    }
}
