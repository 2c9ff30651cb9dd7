//! Data types produced by the aggregation pipeline.

use serde::{Deserialize, Serialize};

/// Number of NEOs passing the active filter on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: String,
    pub count: usize,
}

/// A filtered NEO ranked by its average estimated diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizedNeo {
    pub name: String,
    pub average_diameter_km: f64,
}

/// Smallest canonical miss distance among all NEOs of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateDistance {
    pub date: String,
    pub distance_km: f64,
}

/// The series rendered by the dashboard, all derived from one fetched feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedViews {
    pub counts_by_date: Vec<DateCount>,
    pub top_by_diameter: Vec<SizedNeo>,
    pub closest_approach_by_date: Vec<DateDistance>,
    pub distinct_names: Vec<String>,
}
