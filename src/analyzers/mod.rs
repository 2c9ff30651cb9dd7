//! NEO feed filtering and aggregation.
//!
//! Takes a fetched [`RawFeed`](crate::neo::RawFeed), applies the caller's
//! [`FilterCriteria`](filter::FilterCriteria) and reduces it to the per-date
//! counts, size ranking, closest approaches and name list the dashboard shows.

pub mod aggregate;
pub mod filter;
pub mod types;
