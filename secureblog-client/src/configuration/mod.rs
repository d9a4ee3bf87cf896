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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, time::Duration};

pub mod defaults;
pub mod parser;

/// Client configuration assembled from defaults, config files and the
/// environment.
///
/// # Example
///
/// ```rust,no_run
/// use secureblog_client::configuration::Configuration;
///
/// let config = Configuration::load().expect("Failed to load configuration");
/// println!("Backend: {}", config.api.base_url);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Configuration {
    pub api: ApiConfig,
    pub csrf: CsrfConfig,
    pub register_timeout_secs: u64,
    pub development_mode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

/// Where the anti-forgery token is read from and which header echoes it
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: defaults::default_api_url(),
                request_timeout_secs: defaults::default_request_timeout_secs(),
            },
            csrf: CsrfConfig {
                cookie_name: defaults::default_csrf_cookie_name(),
                header_name: defaults::default_csrf_header_name(),
            },
            register_timeout_secs: defaults::default_register_timeout_secs(),
            development_mode: defaults::default_development_mode(),
        }
    }
}

impl Configuration {
    /// Load configuration from the standard files and the environment.
    ///
    /// Loading order (later sources override earlier ones):
    /// 1. Default values
    /// 2. /etc/secureblog.conf (if exists)
    /// 3. ~/.secureblog.conf (if exists)
    /// 4. ./secureblog.toml (if exists)
    /// 5. Environment variables
    pub fn load() -> Result<Self> {
        Self::load_with_files(&parser::get_config_file_paths())
    }

    /// Same as [`Configuration::load`] with an explicit list of files
    pub fn load_with_files(paths: &[PathBuf]) -> Result<Self> {
        let mut configs = Vec::new();
        for path in paths {
            match parser::parse_toml_file(path) {
                Ok(config) => configs.push(config),
                Err(e) => {
                    tracing::debug!("Could not load config file {}: {:#}", path.display(), e);
                }
            }
        }
        let toml_config = parser::merge_toml_configs(configs);

        let base_url = env::var("SECUREBLOG_API_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_API_URL"))
            .or_else(|_| toml_config.api_url.clone().ok_or(env::VarError::NotPresent))
            .unwrap_or_else(|_| defaults::default_api_url());

        let request_timeout_secs = match env::var("SECUREBLOG_REQUEST_TIMEOUT_SECS") {
            Ok(value) => Some(
                value
                    .parse()
                    .context("Invalid SECUREBLOG_REQUEST_TIMEOUT_SECS environment variable")?,
            ),
            Err(_) => toml_config
                .request_timeout_secs
                .or_else(defaults::default_request_timeout_secs),
        };

        let register_timeout_secs = env::var("SECUREBLOG_REGISTER_TIMEOUT_SECS")
            .or_else(|_| {
                toml_config
                    .register_timeout_secs
                    .map(|t| t.to_string())
                    .ok_or(env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| defaults::default_register_timeout_secs().to_string())
            .parse()
            .context("Invalid SECUREBLOG_REGISTER_TIMEOUT_SECS environment variable")?;

        let cookie_name = env::var("SECUREBLOG_CSRF_COOKIE")
            .or_else(|_| {
                toml_config
                    .csrf_cookie_name
                    .clone()
                    .ok_or(env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| defaults::default_csrf_cookie_name());

        let header_name = env::var("SECUREBLOG_CSRF_HEADER")
            .or_else(|_| {
                toml_config
                    .csrf_header_name
                    .clone()
                    .ok_or(env::VarError::NotPresent)
            })
            .unwrap_or_else(|_| defaults::default_csrf_header_name());

        let development_mode = match env::var("DEVELOPMENT_MODE") {
            Ok(value) => parse_flag(&value).unwrap_or_else(|| {
                tracing::debug!(
                    "Ignoring unrecognized DEVELOPMENT_MODE value {:?}",
                    value
                );
                toml_config
                    .development_mode
                    .unwrap_or_else(defaults::default_development_mode)
            }),
            Err(_) => toml_config
                .development_mode
                .unwrap_or_else(defaults::default_development_mode),
        };

        Ok(Self {
            api: ApiConfig {
                base_url: normalize_base_url(&base_url),
                request_timeout_secs,
            },
            csrf: CsrfConfig {
                cookie_name,
                header_name,
            },
            register_timeout_secs,
            development_mode,
        })
    }

    /// Configuration pointing at `base_url` with every other value defaulted
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::default();
        config.api.base_url = normalize_base_url(base_url);
        config
    }

    pub fn register_timeout(&self) -> Duration {
        Duration::from_secs(self.register_timeout_secs)
    }

    /// Render the effective configuration as a TOML file
    pub fn to_toml(&self) -> Result<String> {
        let toml_config = parser::TomlConfig {
            api_url: Some(self.api.base_url.clone()),
            request_timeout_secs: self.api.request_timeout_secs,
            register_timeout_secs: Some(self.register_timeout_secs),
            csrf_cookie_name: Some(self.csrf.cookie_name.clone()),
            csrf_header_name: Some(self.csrf.header_name.clone()),
            development_mode: Some(self.development_mode),
        };

        toml::to_string_pretty(&toml_config).context("Failed to serialize configuration to TOML")
    }
}

/// Read a boolean switch such as `1`, `yes`, `on` or `false`
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Strip a single trailing slash so endpoints can be appended verbatim
pub fn normalize_base_url(base_url: &str) -> String {
    base_url
        .trim()
        .strip_suffix('/')
        .unwrap_or(base_url.trim())
        .to_string()
}
