// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the FlameConnect cloud API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ProtocolError;
use crate::protocol::wire::{VerifyGuestModeRequest, WriteParametersRequest};

// ============================================================================
// CloudConfig - Configuration for the vendor cloud endpoint
// ============================================================================

/// Configuration for the FlameConnect cloud endpoint.
///
/// The defaults point at the production vendor API; the base URL is
/// overridable for testing against a local mock.
///
/// # Examples
///
/// ```
/// use optiflame_lib::protocol::CloudConfig;
/// use std::time::Duration;
///
/// // Production defaults
/// let config = CloudConfig::new();
///
/// // Against a mock server
/// let config = CloudConfig::new()
///     .with_base_url("http://127.0.0.1:8080/api/Fires/")
///     .with_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudConfig {
    /// Production base URL of the vendor API.
    pub const DEFAULT_BASE_URL: &'static str =
        "https://app-mobileapiext-gdhv.azurewebsites.net/api/Fires/";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL (trailing slash expected).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates a [`CloudClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not http(s) or the HTTP client
    /// cannot be created.
    pub fn into_client(self) -> Result<CloudClient, ProtocolError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .default_headers(vendor_headers())
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CloudClient {
            base_url: self.base_url,
            client,
        })
    }
}

/// Content type the vendor API expects, charset included.
const VENDOR_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Fixed headers the vendor API expects on every request.
fn vendor_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(VENDOR_CONTENT_TYPE));
    headers.insert("app_name", HeaderValue::from_static("FlameConnect"));
    headers.insert("app_device_os", HeaderValue::from_static("iOS"));
    headers
}

// ============================================================================
// CloudClient - The three vendor endpoints
// ============================================================================

/// HTTP client for the three FlameConnect endpoints.
///
/// Stateless: each call is an independent request. Responses are
/// returned as raw JSON values; classification into outcomes happens in
/// [`wire`](crate::protocol::wire).
#[derive(Debug, Clone)]
pub struct CloudClient {
    base_url: String,
    client: Client,
}

impl CloudClient {
    /// Creates a client with production defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        CloudConfig::new().into_client()
    }

    /// Returns the base URL in use.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a guest-mode verification.
    ///
    /// The vendor response is opaque; it is returned raw for the caller
    /// to log or inspect.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success HTTP status.
    pub async fn verify_guest_mode(
        &self,
        request: &VerifyGuestModeRequest<'_>,
    ) -> Result<Value, ProtocolError> {
        let url = format!("{}VerifyGuestMode", self.base_url);
        tracing::debug!(url = %url, "Verifying guest mode");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, VENDOR_CONTENT_TYPE)
            .json(request)
            .send()
            .await?;
        let body = Self::check_status(response)?.json::<Value>().await?;

        tracing::debug!(body = %body, "Guest mode response");
        Ok(body)
    }

    /// GETs the fire overview for a device.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success HTTP status.
    pub async fn get_fire_overview(
        &self,
        device_id: Uuid,
        fire_id: &str,
    ) -> Result<Value, ProtocolError> {
        let url = format!("{}GetFireOverview", self.base_url);
        tracing::debug!(url = %url, fire_id = %fire_id, "Fetching fire overview");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("DeviceId", device_id.to_string()),
                ("FireId", fire_id.to_string()),
            ])
            .send()
            .await?;
        let body = Self::check_status(response)?.json::<Value>().await?;

        tracing::debug!(body = %body, "Fire overview response");
        Ok(body)
    }

    /// POSTs a parameter write.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success HTTP status.
    pub async fn write_parameters(
        &self,
        request: &WriteParametersRequest<'_>,
    ) -> Result<Value, ProtocolError> {
        let url = format!("{}WriteWifiParameters", self.base_url);
        tracing::debug!(url = %url, "Writing fire parameters");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, VENDOR_CONTENT_TYPE)
            .json(request)
            .send()
            .await?;
        let body = Self::check_status(response)?.json::<Value>().await?;

        tracing::debug!(body = %body, "Write parameters response");
        Ok(body)
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProtocolError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }
        if !status.is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CloudConfig::new();
        assert_eq!(config.base_url(), CloudConfig::DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_overrides() {
        let config = CloudConfig::new()
            .with_base_url("http://localhost:1234/api/Fires/")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.base_url(), "http://localhost:1234/api/Fires/");
        assert_eq!(config.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn config_rejects_non_http_base_url() {
        let result = CloudConfig::new()
            .with_base_url("ftp://example.com/")
            .into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn config_into_client_keeps_base_url() {
        let client = CloudConfig::new()
            .with_base_url("http://localhost:1234/api/Fires/")
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/api/Fires/");
    }

    #[test]
    fn vendor_headers_are_fixed() {
        let headers = vendor_headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/json; charset=UTF-8"
        );
        assert_eq!(headers.get("app_name").unwrap(), "FlameConnect");
        assert_eq!(headers.get("app_device_os").unwrap(), "iOS");
    }
}
