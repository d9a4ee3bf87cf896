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

//! Default configuration values for the SecureBlog client

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

pub fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

pub fn default_request_timeout_secs() -> Option<u64> {
    None
}

pub fn default_register_timeout_secs() -> u64 {
    10
}

pub fn default_csrf_cookie_name() -> String {
    "csrf-token".to_string()
}

pub fn default_csrf_header_name() -> String {
    "X-CSRF-Token".to_string()
}

pub fn default_development_mode() -> bool {
    false
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/secureblog.conf")
}

pub fn user_config_path() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".secureblog.conf"))
}

pub fn local_config_path() -> PathBuf {
    PathBuf::from("./secureblog.toml")
}
