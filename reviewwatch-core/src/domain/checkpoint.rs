//! Poller checkpoint
//!
//! The cursor carried between poll iterations: the last server-supplied
//! timestamp and the last message that was actually delivered. There is
//! exactly one writer (the poll loop) and the cursor never survives a
//! process restart.

use chrono::Utc;

/// Last-seen cursor owned by the poll loop
///
/// `last_timestamp` is monotonically non-decreasing: it only ever moves
/// forward, and only from a server-supplied `current_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoint {
    last_timestamp: i64,
    last_message: Option<String>,
}

impl Checkpoint {
    /// Starts the cursor at the epoch; the first poll then reports the
    /// submission's current status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the cursor at the current wall-clock time; only changes that
    /// happen after startup are reported.
    pub fn starting_now() -> Self {
        Self {
            last_timestamp: Utc::now().timestamp(),
            last_message: None,
        }
    }

    /// Window start for the next fetch (unix seconds)
    pub fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    /// Last delivered message, if any
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Advances the timestamp cursor.
    ///
    /// A stale timestamp never moves the cursor backwards.
    pub fn advance_to(&mut self, timestamp: i64) {
        self.last_timestamp = self.last_timestamp.max(timestamp);
    }

    /// Whether this message matches the last delivered one
    pub fn is_duplicate(&self, message: &str) -> bool {
        self.last_message.as_deref() == Some(message)
    }

    /// Records a successfully delivered message.
    pub fn record_message(&mut self, message: String) {
        self.last_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checkpoint_starts_at_zero() {
        let checkpoint = Checkpoint::new();
        assert_eq!(checkpoint.last_timestamp(), 0);
        assert_eq!(checkpoint.last_message(), None);
    }

    #[test]
    fn test_starting_now_is_not_zero() {
        let checkpoint = Checkpoint::starting_now();
        assert!(checkpoint.last_timestamp() > 0);
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut checkpoint = Checkpoint::new();

        checkpoint.advance_to(1000);
        assert_eq!(checkpoint.last_timestamp(), 1000);

        checkpoint.advance_to(2000);
        assert_eq!(checkpoint.last_timestamp(), 2000);

        // A stale server clock must not rewind the window
        checkpoint.advance_to(500);
        assert_eq!(checkpoint.last_timestamp(), 2000);
    }

    #[test]
    fn test_duplicate_detection() {
        let mut checkpoint = Checkpoint::new();
        assert!(!checkpoint.is_duplicate("status changed"));

        checkpoint.record_message("status changed".to_string());
        assert!(checkpoint.is_duplicate("status changed"));
        assert!(!checkpoint.is_duplicate("another status"));
    }
}
