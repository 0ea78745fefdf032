//! Reviewwatch Bot
//!
//! A long-running watcher that polls the homework-review API and relays
//! status changes of the most recent submission to a Telegram chat.
//!
//! Architecture:
//! - Configuration: environment variables validated at startup
//! - Repositories: HTTP communication with the review API and Telegram
//! - Scheduler: the poll loop owning the last-seen checkpoint
//!
//! The bot polls on a fixed interval, de-duplicates against the last
//! delivered message, and keeps running through transient upstream failures.

mod config;
mod repository;
mod scheduler;

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{HttpStatusFeed, TelegramNotifier};
use crate::scheduler::StatusPoller;
use reviewwatch_client::ReviewClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reviewwatch_bot=info,reviewwatch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reviewwatch bot");

    // A missing secret means there is no point entering the loop
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Refusing to start: {e:#}");
            return Err(e);
        }
    };
    info!(
        "Loaded configuration: endpoint={}, poll_interval={:?}",
        config.endpoint, config.poll_interval
    );

    let client = ReviewClient::new(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        config.http_timeout,
    )?;
    let feed = Arc::new(HttpStatusFeed::new(client));

    let notifier = Arc::new(TelegramNotifier::new(
        &config.telegram_token,
        config.telegram_chat_id.clone(),
        config.http_timeout,
    )?);

    info!("Repositories initialized");

    // Cooperative shutdown, observed by the poller between cycles
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut poller = StatusPoller::new(config, feed, notifier);
    poller.run(shutdown_rx).await;

    info!("Poller stopped, exiting");
    Ok(())
}
