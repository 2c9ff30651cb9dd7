use serde::{Deserialize, Serialize};

use crate::neo::NeoRecord;

/// Client-supplied narrowing of a feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Inclusive lower bound on the average estimated diameter, in km.
    pub min_diameter_km: f64,
    /// Case-insensitive substring of the NEO name. Empty matches everything.
    pub name_substring: String,
}

impl FilterCriteria {
    pub fn new(min_diameter_km: f64, name_substring: impl Into<String>) -> Self {
        Self {
            min_diameter_km,
            name_substring: name_substring.into(),
        }
    }

    /// Returns a predicate over records with the lowercased needle computed once.
    ///
    /// Records without a diameter estimate never match.
    pub fn matcher(&self) -> impl Fn(&NeoRecord) -> bool + '_ {
        let needle = self.name_substring.to_lowercase();
        move |record: &NeoRecord| {
            let Some(avg) = record.average_diameter_km() else {
                return false;
            };
            avg >= self.min_diameter_km
                && (needle.is_empty() || record.name.to_lowercase().contains(&needle))
        }
    }

    pub fn matches(&self, record: &NeoRecord) -> bool {
        self.matcher()(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::DiameterRange;

    fn record(name: &str, min: f64, max: f64) -> NeoRecord {
        NeoRecord {
            name: name.to_string(),
            estimated_diameter_km: Some(DiameterRange { min, max }),
            close_approaches: vec![],
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = FilterCriteria::default();
        assert!(filter.matches(&record("A", 0.0, 0.0)));
        assert!(filter.matches(&record("", 0.01, 0.02)));
    }

    #[test]
    fn test_min_diameter_is_inclusive_on_average() {
        let filter = FilterCriteria::new(1.0, "");
        assert!(filter.matches(&record("edge", 0.5, 1.5)));
        assert!(!filter.matches(&record("small", 0.5, 1.4)));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let filter = FilterCriteria::new(0.0, "eRoS");
        assert!(filter.matches(&record("433 Eros (A898 PA)", 1.0, 2.0)));
        assert!(!filter.matches(&record("(2021 XY)", 1.0, 2.0)));
    }

    #[test]
    fn test_both_predicates_must_hold() {
        let filter = FilterCriteria::new(1.0, "eros");
        assert!(!filter.matches(&record("Eros", 0.1, 0.2)));
        assert!(!filter.matches(&record("Apophis", 3.0, 4.0)));
    }

    #[test]
    fn test_missing_diameter_never_matches() {
        let filter = FilterCriteria::default();
        let mut r = record("A", 1.0, 2.0);
        r.estimated_diameter_km = None;
        assert!(!filter.matches(&r));
    }
}
