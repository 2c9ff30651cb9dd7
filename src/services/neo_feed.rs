//! Trait for anything that can supply a NEO feed for a date range.

use chrono::NaiveDate;

use crate::error::Result;
use crate::neo::RawFeed;

/// Abstraction over the upstream NEO feed provider (e.g., NASA NeoWs).
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Returns every NEO with a close approach between `start` and `end`, inclusive.
    ///
    /// Errors are passed through to the caller unchanged; implementations do
    /// not retry.
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<RawFeed>;
}
