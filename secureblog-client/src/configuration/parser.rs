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

//! TOML configuration files for the SecureBlog client.
//!
//! Every key is optional so a file may set only what it needs; several
//! files are merged with later ones taking precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::defaults;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TomlConfig {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub register_timeout_secs: Option<u64>,
    pub csrf_cookie_name: Option<String>,
    pub csrf_header_name: Option<String>,
    pub development_mode: Option<bool>,
}

/// Parse a TOML configuration file; a missing file yields an empty config
pub fn parse_toml_file<P: AsRef<Path>>(path: P) -> Result<TomlConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse TOML configuration file: {}",
            path.display()
        )
    })
}

/// Standard configuration file paths, lowest precedence first
pub fn get_config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![defaults::system_config_path()];
    if let Some(user) = defaults::user_config_path() {
        paths.push(user);
    }
    paths.push(defaults::local_config_path());
    paths
}

/// Merge configurations; a key set in a later config wins
pub fn merge_toml_configs(configs: Vec<TomlConfig>) -> TomlConfig {
    let mut merged = TomlConfig::default();

    for config in configs {
        if config.api_url.is_some() {
            merged.api_url = config.api_url;
        }
        if config.request_timeout_secs.is_some() {
            merged.request_timeout_secs = config.request_timeout_secs;
        }
        if config.register_timeout_secs.is_some() {
            merged.register_timeout_secs = config.register_timeout_secs;
        }
        if config.csrf_cookie_name.is_some() {
            merged.csrf_cookie_name = config.csrf_cookie_name;
        }
        if config.csrf_header_name.is_some() {
            merged.csrf_header_name = config.csrf_header_name;
        }
        if config.development_mode.is_some() {
            merged.development_mode = config.development_mode;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_missing_file() {
        let config = parse_toml_file("/definitely/not/here.toml").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_parse_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"https://api.example.com\"").unwrap();
        writeln!(file, "register_timeout_secs = 5").unwrap();

        let config = parse_toml_file(file.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.register_timeout_secs, Some(5));
        assert!(config.csrf_cookie_name.is_none());
    }

    #[test]
    fn test_parse_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url = [not toml").unwrap();
        assert!(parse_toml_file(file.path()).is_err());
    }

    #[test]
    fn test_merge_later_wins() {
        let first = TomlConfig {
            api_url: Some("http://first".to_string()),
            development_mode: Some(true),
            ..Default::default()
        };
        let second = TomlConfig {
            api_url: Some("http://second".to_string()),
            csrf_header_name: Some("X-XSRF-Token".to_string()),
            ..Default::default()
        };

        let merged = merge_toml_configs(vec![first, second]);
        assert_eq!(merged.api_url.as_deref(), Some("http://second"));
        assert_eq!(merged.development_mode, Some(true));
        assert_eq!(merged.csrf_header_name.as_deref(), Some("X-XSRF-Token"));
    }

    #[test]
    fn test_config_paths_end_with_local_file() {
        let paths = get_config_file_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from("/etc/secureblog.conf")));
        assert_eq!(paths.last(), Some(&PathBuf::from("./secureblog.toml")));
    }
}
