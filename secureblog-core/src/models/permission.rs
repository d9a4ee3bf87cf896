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

//! Role and ownership checks on an already-fetched user.
//!
//! These only drive what the interface offers. The backend remains
//! responsible for enforcing ownership on every mutating request.

use super::user::{Role, User};

/// Check if the user holds `role`; ADMIN passes every role check
pub fn has_role(user: Option<&User>, role: Role) -> bool {
    user.is_some_and(|user| user.role.satisfies(role))
}

pub fn is_admin(user: Option<&User>) -> bool {
    has_role(user, Role::Admin)
}

/// Check if the user is the one a resource belongs to
pub fn owns_resource(user: Option<&User>, resource_user_id: &str) -> bool {
    user.is_some_and(|user| user.id == resource_user_id)
}

/// Owner or admin
pub fn can_access_resource(user: Option<&User>, resource_user_id: &str) -> bool {
    owns_resource(user, resource_user_id) || is_admin(user)
}
