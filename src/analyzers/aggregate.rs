use crate::analyzers::filter::FilterCriteria;
use crate::analyzers::types::{DateCount, DateDistance, DerivedViews, SizedNeo};
use crate::neo::RawFeed;
use std::collections::BTreeSet;

/// Maximum number of entries in [`DerivedViews::top_by_diameter`].
pub const TOP_N: usize = 5;

/// Reduces a fetched feed into the dashboard series.
///
/// Counts and the size ranking only see records passing `filter`; closest
/// approaches and the name list are computed over the whole feed.
pub fn aggregate_views(feed: &RawFeed, filter: &FilterCriteria) -> DerivedViews {
    let matches = filter.matcher();

    let mut counts_by_date = Vec::with_capacity(feed.days.len());
    let mut closest_approach_by_date = Vec::with_capacity(feed.days.len());
    let mut pool = Vec::new();

    for day in &feed.days {
        let mut count = 0;
        for record in &day.records {
            if !matches(record) {
                continue;
            }
            count += 1;
            if let Some(avg) = record.average_diameter_km() {
                pool.push(SizedNeo {
                    name: record.name.clone(),
                    average_diameter_km: avg,
                });
            }
        }
        counts_by_date.push(DateCount {
            date: day.date.clone(),
            count,
        });

        let distance_km = day
            .records
            .iter()
            .map(|r| r.canonical_miss_distance_km())
            .reduce(f64::min)
            .unwrap_or(0.0);
        closest_approach_by_date.push(DateDistance {
            date: day.date.clone(),
            distance_km,
        });
    }

    // sort_by is stable, so equal diameters keep encounter order
    pool.sort_by(|a, b| b.average_diameter_km.total_cmp(&a.average_diameter_km));
    pool.truncate(TOP_N);

    let distinct_names = feed
        .days
        .iter()
        .flat_map(|d| d.records.iter().map(|r| r.name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    DerivedViews {
        counts_by_date,
        top_by_diameter: pool,
        closest_approach_by_date,
        distinct_names,
    }
}
