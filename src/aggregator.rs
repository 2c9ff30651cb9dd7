//! Cached NEO view aggregation.
//!
//! [`NeoAggregator::get_views`] is the single entry point: it looks the query
//! up in the cache, fetches and aggregates on a miss, and stores the result.
//! Concurrent misses for the same key are not coalesced; each one fetches and
//! the last write wins.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::analyzers::aggregate::aggregate_views;
use crate::analyzers::filter::FilterCriteria;
use crate::analyzers::types::DerivedViews;
use crate::clock::{Clock, SystemClock};
use crate::error::{NeoError, Result};
use crate::infra::cache::{CacheEntry, CacheKey, KeyValueStore};
use crate::services::neo_feed::FeedSource;

pub struct NeoAggregator<F, S, C = SystemClock> {
    source: F,
    store: S,
    clock: C,
}

impl<F: FeedSource, S: KeyValueStore> NeoAggregator<F, S, SystemClock> {
    pub fn new(source: F, store: S) -> Self {
        Self::with_clock(source, store, SystemClock)
    }
}

impl<F: FeedSource, S: KeyValueStore, C: Clock> NeoAggregator<F, S, C> {
    pub fn with_clock(source: F, store: S, clock: C) -> Self {
        Self {
            source,
            store,
            clock,
        }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the derived views for `[start, end]` under `filter`.
    ///
    /// A fresh cache entry is returned without touching the feed. Otherwise
    /// the feed is fetched once, aggregated and cached.
    ///
    /// # Errors
    ///
    /// [`NeoError::InvalidDateRange`] when `start > end`. Fetch failures are
    /// returned as-is and leave the cache untouched.
    #[tracing::instrument(skip(self, filter), fields(start = %start, end = %end))]
    pub async fn get_views(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &FilterCriteria,
    ) -> Result<DerivedViews> {
        if start > end {
            return Err(NeoError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let key = CacheKey::new(start, end, filter);

        if let Some(entry) = self.cached(&key).await {
            if entry.is_fresh(self.clock.now()) {
                debug!(key = %key, "Loaded NEO views from cache");
                return Ok(entry.views);
            }
            info!(key = %key, created_at = %entry.created_at, "Cached NEO views expired");
            if let Err(e) = self.store.remove(key.as_str()).await {
                warn!(key = %key, error = %e, "Failed to remove expired cache entry");
            }
        }

        let feed = self.source.fetch(start, end).await?;
        let views = aggregate_views(&feed, filter);
        debug!(
            dates = views.counts_by_date.len(),
            top = views.top_by_diameter.len(),
            names = views.distinct_names.len(),
            "NEO views aggregated"
        );

        let entry = CacheEntry::new(&key, self.clock.now(), views.clone());
        match self.store.set(key.as_str(), entry).await {
            Ok(()) => debug!(key = %key, "Saved NEO views to cache"),
            Err(e) => warn!(key = %key, error = %e, "Failed to save NEO views to cache"),
        }

        Ok(views)
    }

    /// A store that cannot be read behaves like an empty one.
    async fn cached(&self, key: &CacheKey) -> Option<CacheEntry> {
        match self.store.get(key.as_str()).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }
}
