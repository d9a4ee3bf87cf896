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
use cookie::Cookie;
use reqwest::{
    cookie::{CookieStore, Jar},
    header::CONTENT_TYPE,
    Client, Method, StatusCode,
};
use secureblog_core::{ApiError, FieldErrors};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};
use url::Url;

use crate::configuration::{normalize_base_url, Configuration};

/// HTTP client for the SecureBlog backend.
///
/// Every request carries the cookies stored in the client's jar and, when
/// the backend has set one, the CSRF cookie echoed back as a header. All
/// failures come back as [`ApiError`].
///
/// The client is cheap to clone; clones share the connection pool and the
/// cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    jar: Arc<Jar>,
    csrf_cookie_name: String,
    csrf_header_name: String,
}

impl ApiClient {
    /// Client for `base_url` with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_configuration(&Configuration::with_base_url(base_url))
    }

    pub fn from_configuration(config: &Configuration) -> Result<Self> {
        let base_url = normalize_base_url(&config.api.base_url);
        Url::parse(&base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(jar.clone());
        if let Some(secs) = config.api.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        if config.development_mode {
            debug!("API client base URL: {}", base_url);
        }

        Ok(Self {
            http,
            base_url,
            jar,
            csrf_cookie_name: config.csrf.cookie_name.clone(),
            csrf_header_name: config.csrf.header_name.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The jar holding the session and CSRF cookies
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Current CSRF token for the backend, if its cookie is set
    pub fn csrf_token(&self) -> Option<String> {
        let url = Url::parse(&format!("{}/", self.base_url)).ok()?;
        self.csrf_token_for(&url)
    }

    fn csrf_token_for(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let raw = header.to_str().ok()?;

        Cookie::split_parse_encoded(raw)
            .filter_map(|cookie| cookie.ok())
            .find(|cookie| cookie.name() == self.csrf_cookie_name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Perform a JSON request against `base_url + endpoint`
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let parsed = Url::parse(&url)
            .map_err(|e| ApiError::network(format!("Invalid request URL {}: {}", url, e)))?;

        let mut request = self
            .http
            .request(method.clone(), parsed.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.csrf_token_for(&parsed) {
            request = request.header(self.csrf_header_name.as_str(), token);
        }

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::network(format!("Failed to encode request body: {}", e)))?;
            request = request.body(bytes);
        }

        debug!(%method, %url, "Sending API request");

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if !is_json {
            if !status.is_success() {
                return Err(ApiError::http(
                    status.as_u16(),
                    format!("HTTP error {}: {}", status.as_u16(), reason(status)),
                ));
            }
            return decode(Value::Object(Default::default()), status, endpoint);
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            // An unreadable error body still carries its status
            let data = parsed.unwrap_or(Value::Null);
            return Err(error_from_body(status, &data));
        }

        let data = parsed
            .map_err(|e| ApiError::network(format!("Invalid JSON response: {}", e)))?;
        decode(data, status, endpoint)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, Value>(Method::GET, endpoint, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, body).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, body).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, Value>(Method::DELETE, endpoint, None).await
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        warn!("API request failed before a response: {}", error);

        if error.is_connect() || error.is_timeout() || error.is_request() {
            ApiError::network(format!(
                "Unable to reach the server. Check that the backend is running at {}",
                self.base_url
            ))
        } else {
            ApiError::network(format!("Network error: {}", error))
        }
    }
}

/// Escape an identifier for use as a single path segment
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}

fn decode<T: DeserializeOwned>(data: Value, status: StatusCode, endpoint: &str) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| {
        ApiError::http(
            status.as_u16(),
            format!("Unexpected response from {}: {}", endpoint, e),
        )
    })
}

/// Build an error from a `{ message, errors? }` body
fn error_from_body(status: StatusCode, data: &Value) -> ApiError {
    let message = match data.get("message") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(Value::Array(messages)) if !messages.is_empty() => messages
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => format!("Error {}: {}", status.as_u16(), reason(status)),
    };

    ApiError::http(status.as_u16(), message).with_errors(field_errors(data.get("errors")))
}

fn field_errors(value: Option<&Value>) -> Option<FieldErrors> {
    let object = value?.as_object()?;

    let errors: FieldErrors = object
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::String(message) => vec![message.clone()],
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                other => vec![other.to_string()],
            };
            (field.clone(), messages)
        })
        .collect();

    Some(errors)
}
