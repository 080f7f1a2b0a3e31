// ============================================================================
// Nav Infrastructure - HTTP Manifest Source
// File: crates/nav-infrastructure/src/http/manifest_client.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

use nav_core::error::NavError;
use nav_core::repositories::ManifestSource;
use nav_shared::config::ApiSettings;
use nav_shared::utils::is_public_route;

pub struct HttpManifestSource {
    client: Client,
    url: String,
}

impl HttpManifestSource {
    pub fn new(settings: &ApiSettings) -> Result<Self, NavError> {
        let url = join_url(&settings.base_url, &settings.menu_endpoint);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Auth endpoints never carry the session
        if let Some(cookie) = settings.session_cookie.as_deref() {
            if !is_public_route(&url) {
                let value = HeaderValue::from_str(cookie)
                    .map_err(|e| NavError::Internal(format!("Invalid session cookie: {}", e)))?;
                headers.insert(COOKIE, value);
            }
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .default_headers(headers)
            .cookie_store(settings.with_credentials)
            .build()
            .map_err(|e| NavError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    async fn fetch_manifest(&self) -> Result<Value, NavError> {
        debug!("GET {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            error!("Network error: no response from {}: {}", self.url, e);
            NavError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, error_message(&body), &self.url));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("Menu response from {} is not valid JSON: {}", self.url, e);
            NavError::Parse(e.to_string())
        })
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Backends answer errors as `{ "message": "..." }`; anything else is
/// reported generically.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "An error occurred".to_string())
}

fn classify_status(status: StatusCode, message: String, url: &str) -> NavError {
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("Unauthorized: session expired or invalid");
            NavError::Unauthorized(message)
        }
        StatusCode::FORBIDDEN => {
            warn!("Access denied: {}", message);
            NavError::Forbidden(message)
        }
        StatusCode::NOT_FOUND => {
            warn!("Resource not found: {}", url);
            NavError::NotFound(url.to_string())
        }
        s if s.is_server_error() => {
            error!("Server error: {}", message);
            NavError::Upstream {
                status: s.as_u16(),
                message,
            }
        }
        s => {
            error!("API error {}: {}", s, message);
            NavError::Upstream {
                status: s.as_u16(),
                message,
            }
        }
    }
}
