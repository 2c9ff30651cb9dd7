//! Look-aside cache for derived NEO views.
//!
//! [`CacheKey`] identifies one query, [`CacheEntry`] is what gets stored.
//! [`KeyValueStore`] is the async trait the aggregator reads and writes through.
//! [`MemoryStore`] keeps entries for the life of the process, [`FileStore`]
//! keeps them in a JSON file so they survive between CLI runs.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzers::filter::FilterCriteria;
use crate::analyzers::types::DerivedViews;
use crate::error::Result;

/// How long a cached entry is served before the feed is fetched again.
pub const CACHE_EXPIRY: TimeDelta = TimeDelta::hours(1);

/// Stable cache key built from the canonical query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(start: NaiveDate, end: NaiveDate, filter: &FilterCriteria) -> Self {
        Self(format!(
            "neo_{}_{}_diam{}_name{}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            // -0.0 + 0.0 is 0.0, so both zeros share one key
            filter.min_diameter_km + 0.0,
            filter.name_substring
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub views: DerivedViews,
}

impl CacheEntry {
    pub fn new(key: &CacheKey, created_at: DateTime<Utc>, views: DerivedViews) -> Self {
        Self {
            key: key.as_str().to_string(),
            created_at,
            views,
        }
    }

    /// An entry is fresh while strictly less than [`CACHE_EXPIRY`] old.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < CACHE_EXPIRY
    }
}

/// Session-scoped key/value storage for [`CacheEntry`] values.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}
