//! Review API Client
//!
//! A small, type-safe HTTP client for the homework-review API.
//!
//! The client owns transport and protocol concerns only: it authenticates,
//! sends the `from_date` window, and turns transport failures, non-200
//! responses, and error-bearing payloads into typed [`ClientError`] values.
//! Shape validation of a successful payload belongs to the caller.
//!
//! # Example
//!
//! ```no_run
//! use reviewwatch_client::{DEFAULT_ENDPOINT, ReviewClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ReviewClient::new(
//!         DEFAULT_ENDPOINT,
//!         "my-oauth-token",
//!         Duration::from_secs(30),
//!     )?;
//!
//!     let payload = client.homework_statuses(0).await?;
//!     println!("raw feed: {payload}");
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ClientError, Result};

use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fixed endpoint of the homework-review API
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Payload keys that signal a server-side error condition
const SERVICE_ERROR_KEYS: [&str; 2] = ["code", "error"];

/// HTTP client for the homework-review API
#[derive(Debug, Clone)]
pub struct ReviewClient {
    /// Endpoint URL queried on every poll
    endpoint: String,
    /// OAuth token sent in the `Authorization` header
    token: String,
    /// HTTP client instance
    client: Client,
}

impl ReviewClient {
    /// Creates a new client with a bounded request timeout.
    ///
    /// # Arguments
    /// * `endpoint` - The review API URL (usually [`DEFAULT_ENDPOINT`])
    /// * `token` - OAuth token identifying the student
    /// * `timeout` - Upper bound for a single request
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, token, client))
    }

    /// Creates a client around an already configured HTTP client.
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Endpoint this client queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches homework statuses changed since `from_date` (unix seconds).
    ///
    /// On success the decoded payload is returned unmodified. A payload that
    /// decodes but carries one of the recognized error keys (`code`,
    /// `error`) is reported as [`ClientError::Service`]: the API answers
    /// 200 OK for some server-side failures.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        debug!(from_date, "requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let payload: Value = self.handle_response(response).await?;

        if let Some((key, detail)) = service_error(&payload) {
            return Err(ClientError::Service { key, detail });
        }

        Ok(payload)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks that the status is exactly 200 OK and decodes the body,
    /// mapping each failure mode to its own error.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("response body is not valid JSON: {e}")))
    }
}

/// Looks for the error-bearing keys a nominally successful payload may carry.
fn service_error(payload: &Value) -> Option<(&'static str, String)> {
    SERVICE_ERROR_KEYS
        .iter()
        .find_map(|key| payload.get(key).map(|detail| (*key, detail.to_string())))
}
