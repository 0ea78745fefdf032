//! Telegram notifier
//!
//! Delivers messages through the Telegram Bot API. Delivery failures are
//! returned as values for the scheduler to log; nothing here panics or
//! retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The call to the Telegram API could not complete
    #[error("request to the Telegram API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Telegram refused the delivery
    #[error("Telegram rejected the message (status {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },
}

/// Repository trait for outbound notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers a single text message to the configured chat.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Notifier backed by the Telegram Bot API
pub struct TelegramNotifier {
    client: Client,
    url: String,
    chat_id: String,
}

/// Request body for the `sendMessage` method
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    /// Creates a notifier with a bounded request timeout.
    ///
    /// # Arguments
    /// * `token` - Telegram bot token
    /// * `chat_id` - Chat all messages are delivered to
    /// * `timeout` - Upper bound for a single delivery
    pub fn new(
        token: impl AsRef<str>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!(
                "https://api.telegram.org/bot{}/sendMessage",
                token.as_ref()
            ),
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Telegram reports some failures inside a 200 response
        let payload: Value = response.json().await?;
        if !payload.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: payload.to_string(),
            });
        }

        Ok(())
    }
}
