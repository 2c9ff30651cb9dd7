//! In-memory model of the upstream Near-Earth-Object feed.

/// Estimated diameter bounds of a NEO, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiameterRange {
    pub min: f64,
    pub max: f64,
}

impl DiameterRange {
    /// The single definition of a NEO's size used by both filtering and ranking.
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseApproach {
    pub miss_distance_km: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeoRecord {
    pub name: String,
    /// `None` when the upstream omitted the kilometre diameter estimate.
    pub estimated_diameter_km: Option<DiameterRange>,
    pub close_approaches: Vec<CloseApproach>,
}

impl NeoRecord {
    pub fn average_diameter_km(&self) -> Option<f64> {
        self.estimated_diameter_km.map(|d| d.average())
    }

    /// Miss distance of the first listed approach, or 0 when there is none.
    pub fn canonical_miss_distance_km(&self) -> f64 {
        self.close_approaches
            .first()
            .map(|a| a.miss_distance_km)
            .unwrap_or(0.0)
    }
}

/// All records reported for one calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDay {
    pub date: String,
    pub records: Vec<NeoRecord>,
}

/// A fetched feed. Days keep the order in which the upstream listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeed {
    pub days: Vec<FeedDay>,
}

impl RawFeed {
    pub fn total_records(&self) -> usize {
        self.days.iter().map(|d| d.records.len()).sum()
    }
}
