//! Review feed repository
//!
//! Thin seam over the review API client so the scheduler can be exercised
//! against an in-memory feed in tests.

use async_trait::async_trait;
use serde_json::Value;

use reviewwatch_client::{ClientError, ReviewClient};

/// Repository trait for fetching the review feed
#[async_trait]
pub trait StatusFeed: Send + Sync {
    /// Fetches the raw feed of status changes since `from_date` (unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value, ClientError>;
}

/// HTTP implementation of [`StatusFeed`] backed by [`ReviewClient`]
pub struct HttpStatusFeed {
    client: ReviewClient,
}

impl HttpStatusFeed {
    /// Creates a feed around a configured review client.
    pub fn new(client: ReviewClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusFeed for HttpStatusFeed {
    async fn fetch(&self, from_date: i64) -> Result<Value, ClientError> {
        self.client.homework_statuses(from_date).await
    }
}
