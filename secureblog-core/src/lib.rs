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

//! Domain layer for the SecureBlog client.
//!
//! Everything in this crate is pure: sanitization, authorization decisions,
//! form validation and dashboard aggregation operate on data that has already
//! been fetched by `secureblog-client`.

pub mod dashboard;
pub mod error;
pub mod guard;
pub mod models;
pub mod sanitize;
pub mod search;
pub mod validators;

pub use error::{ApiError, ErrorKind, FieldErrors};
