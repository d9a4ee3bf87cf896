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

use secureblog_core::guard::{GuardState, RouteGuard, RouteRequirements};

use crate::client::ApiClient;

/// Build a guard for `requirements` and resolve it against the backend.
///
/// The session is fetched without the network fallback so that a transient
/// failure leaves the guard checking instead of sending the user to login.
pub async fn check_route(client: &ApiClient, requirements: RouteRequirements) -> RouteGuard {
    let mut guard = RouteGuard::new(requirements);
    recheck(client, &mut guard).await;
    guard
}

/// Resolve an existing guard again, e.g. after a transient failure
pub async fn recheck<'g>(client: &ApiClient, guard: &'g mut RouteGuard) -> &'g GuardState {
    let outcome = client.auth().fetch_session().await;
    guard.resolve(outcome)
}
