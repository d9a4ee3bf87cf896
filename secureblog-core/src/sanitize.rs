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

//! HTML sanitization for anything a user typed.
//!
//! Two fixed policies exist: the strict one strips every tag and attribute,
//! the comment one keeps a handful of formatting tags and http(s) links.
//! Output is serialized HTML, so text like `a < b` comes back as
//! `a &lt; b` and sanitizing twice gives the same result.

use ammonia::{Builder, UrlRelative};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Elements whose content is dropped along with the element itself
const NON_TEXT_TAGS: [&str; 5] = ["script", "style", "textarea", "option", "noscript"];

const COMMENT_TAGS: [&str; 6] = ["p", "br", "strong", "em", "u", "a"];
const COMMENT_ANCHOR_ATTRIBUTES: [&str; 2] = ["href", "title"];
const COMMENT_SCHEMES: [&str; 2] = ["http", "https"];

/// Allow-list of tags, per-tag attributes and URL schemes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizePolicy {
    pub allowed_tags: BTreeSet<String>,
    pub allowed_attributes: BTreeMap<String, BTreeSet<String>>,
    pub allowed_schemes: BTreeSet<String>,
}

impl SanitizePolicy {
    /// No tags, no attributes, no schemes
    pub fn strict() -> Self {
        Self::default()
    }

    /// `p, br, strong, em, u, a` with `href`/`title` on anchors, http(s) only
    pub fn comment() -> Self {
        let mut allowed_attributes = BTreeMap::new();
        allowed_attributes.insert(
            "a".to_string(),
            COMMENT_ANCHOR_ATTRIBUTES
                .iter()
                .map(|attr| attr.to_string())
                .collect(),
        );

        Self {
            allowed_tags: COMMENT_TAGS.iter().map(|tag| tag.to_string()).collect(),
            allowed_attributes,
            allowed_schemes: COMMENT_SCHEMES
                .iter()
                .map(|scheme| scheme.to_string())
                .collect(),
        }
    }

    fn builder(&self) -> Builder<'_> {
        // ammonia refuses a tag that is both allowed and content-cleaned
        let clean_content: HashSet<&str> = NON_TEXT_TAGS
            .iter()
            .copied()
            .filter(|tag| !self.allowed_tags.contains(*tag))
            .collect();

        let mut builder = Builder::empty();
        builder
            .add_tags(self.allowed_tags.iter().map(String::as_str))
            .url_schemes(self.allowed_schemes.iter().map(String::as_str).collect())
            .url_relative(UrlRelative::Deny)
            .link_rel(None)
            .strip_comments(true)
            .clean_content_tags(clean_content);

        for (tag, attributes) in &self.allowed_attributes {
            builder.add_tag_attributes(tag.as_str(), attributes.iter().map(String::as_str));
        }

        builder
    }
}

/// Sanitize `html` with the given policy, or strip all markup without one
pub fn sanitize_input(html: &str, policy: Option<&SanitizePolicy>) -> String {
    match policy {
        Some(policy) => policy.builder().clean(html).to_string(),
        None => SanitizePolicy::strict().builder().clean(html).to_string(),
    }
}

/// Strip every tag and attribute; for titles, names and other display strings
pub fn sanitize_text(text: &str) -> String {
    sanitize_input(text, None)
}

/// Keep basic formatting and http(s) links; for comment bodies
pub fn sanitize_comment(html: &str) -> String {
    sanitize_input(html, Some(&SanitizePolicy::comment()))
}
