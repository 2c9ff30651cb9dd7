//! Output formatting and persistence for derived NEO views.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::DerivedViews;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row: the per-date series joined on their shared date.
#[derive(Debug, Serialize)]
struct DateRow<'a> {
    date: &'a str,
    count: usize,
    closest_km: f64,
}

/// Logs the views using Rust's debug pretty-print format.
pub fn print_pretty(views: &DerivedViews) {
    debug!("{:#?}", views);
}

/// Logs the views as pretty-printed JSON.
pub fn print_json(views: &DerivedViews) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(views)?);
    Ok(())
}

/// Logs a one-line summary per date followed by the size ranking.
pub fn print_summary(views: &DerivedViews) {
    for (count, closest) in views
        .counts_by_date
        .iter()
        .zip(&views.closest_approach_by_date)
    {
        info!(
            date = %count.date,
            count = count.count,
            closest_km = closest.distance_km,
            "NEOs per day"
        );
    }
    for (rank, neo) in views.top_by_diameter.iter().enumerate() {
        info!(
            rank = rank + 1,
            name = %neo.name,
            diameter_km = neo.average_diameter_km,
            "Top by diameter"
        );
    }
}

/// Appends one `date,count,closest_km` row per date to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, views: &DerivedViews) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for (count, closest) in views
        .counts_by_date
        .iter()
        .zip(&views.closest_approach_by_date)
    {
        writer.serialize(DateRow {
            date: &count.date,
            count: count.count,
            closest_km: closest.distance_km,
        })?;
    }
    writer.flush()?;

    Ok(())
}
