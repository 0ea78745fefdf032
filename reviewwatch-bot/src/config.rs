//! Bot configuration
//!
//! All settings come from the environment (optionally via a `.env` file),
//! are read once at startup, and are validated before the poll loop starts.

use anyhow::{Context, Result, bail};
use std::time::Duration;

use reviewwatch_client::DEFAULT_ENDPOINT;

/// Default pause between poll cycles
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Default bound for a single HTTP call
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the checkpoint cursor starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAt {
    /// From the epoch: the first poll reports the submission's current status
    Zero,
    /// From startup time: only changes after startup are reported
    Now,
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the review API
    pub practicum_token: String,

    /// Telegram bot token used for delivery
    pub telegram_token: String,

    /// Telegram chat the notifications go to
    pub telegram_chat_id: String,

    /// Review API endpoint
    pub endpoint: String,

    /// Pause between poll cycles
    pub poll_interval: Duration,

    /// Upper bound for a single HTTP call (fetch or notify)
    pub http_timeout: Duration,

    /// Where the checkpoint cursor starts
    pub start_at: StartAt,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PRACTICUM_TOKEN (required)
    /// - TELEGRAM_TOKEN (required)
    /// - TELEGRAM_CHAT_ID (required)
    /// - STATUS_ENDPOINT (optional, default: the fixed review API URL)
    /// - POLL_INTERVAL (optional, seconds, default: 600)
    /// - HTTP_TIMEOUT (optional, seconds, default: 30)
    /// - START_AT (optional, "zero" or "now", default: "zero")
    pub fn from_env() -> Result<Self> {
        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let endpoint =
            std::env::var("STATUS_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval = seconds_var("POLL_INTERVAL")?.unwrap_or(DEFAULT_POLL_INTERVAL);
        let http_timeout = seconds_var("HTTP_TIMEOUT")?.unwrap_or(DEFAULT_HTTP_TIMEOUT);

        let start_at = match std::env::var("START_AT") {
            Err(_) => StartAt::Zero,
            Ok(value) => parse_start_at(&value)?,
        };

        let config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
            http_timeout,
            start_at,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.practicum_token.is_empty() {
            bail!("PRACTICUM_TOKEN cannot be empty");
        }

        if self.telegram_token.is_empty() {
            bail!("TELEGRAM_TOKEN cannot be empty");
        }

        if self.telegram_chat_id.is_empty() {
            bail!("TELEGRAM_CHAT_ID cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            bail!("endpoint must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            bail!("poll_interval must be greater than 0");
        }

        if self.http_timeout.as_secs() == 0 {
            bail!("http_timeout must be greater than 0");
        }

        Ok(())
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} environment variable not set"))
}

fn seconds_var(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Err(_) => Ok(None),
        Ok(value) => {
            let secs = value
                .parse::<u64>()
                .with_context(|| format!("{name} must be an integer number of seconds"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
    }
}

fn parse_start_at(value: &str) -> Result<StartAt> {
    match value {
        "zero" => Ok(StartAt::Zero),
        "now" => Ok(StartAt::Now),
        other => bail!("START_AT must be \"zero\" or \"now\", got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            practicum_token: "practicum".to_string(),
            telegram_token: "telegram".to_string(),
            telegram_chat_id: "12345".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            start_at: StartAt::Zero,
        }
    }

    #[test]
    fn test_config_validation() {
        let config = valid_config();
        assert!(config.validate().is_ok());

        // Each missing secret must fail validation on its own
        let mut config = valid_config();
        config.practicum_token = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.telegram_token = String::new();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.telegram_chat_id = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let mut config = valid_config();
        config.endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "http://localhost:8080/statuses".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        let mut config = valid_config();
        config.poll_interval = Duration::from_secs(0);
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.http_timeout = Duration::from_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_start_at() {
        assert_eq!(parse_start_at("zero").unwrap(), StartAt::Zero);
        assert_eq!(parse_start_at("now").unwrap(), StartAt::Now);
        assert!(parse_start_at("yesterday").is_err());
    }
}
