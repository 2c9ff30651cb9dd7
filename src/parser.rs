//! JSON parser for the NeoWs `feed` response.
//!
//! The response is walked as a generic [`serde_json::Value`] so that only the
//! handful of fields the aggregator needs are extracted, and so that the date
//! keys of `near_earth_objects` keep their document order.

use serde::de::Error as _;
use serde_json::Value;
use tracing::warn;

use crate::error::{NeoError, Result};
use crate::neo::{CloseApproach, DiameterRange, FeedDay, NeoRecord, RawFeed};

/// Decodes a NeoWs feed document into a [`RawFeed`].
///
/// # Errors
///
/// Returns [`NeoError::Json`] if the bytes are not JSON or lack a
/// `near_earth_objects` object, and [`NeoError::MalformedRecord`] if a numeric
/// field is present but is not a number.
pub fn parse_feed(bytes: &[u8]) -> Result<RawFeed> {
    let json: Value = serde_json::from_slice(bytes)?;

    let objects = json["near_earth_objects"].as_object().ok_or_else(|| {
        serde_json::Error::custom("response has no `near_earth_objects` object")
    })?;

    let mut days = Vec::with_capacity(objects.len());
    for (date, neos) in objects {
        let records = match neos.as_array() {
            Some(items) => items
                .iter()
                .map(|item| parse_record(date, item))
                .collect::<Result<Vec<_>>>()?,
            None => {
                warn!(date = %date, "Feed day is not an array, treating as empty");
                Vec::new()
            }
        };
        days.push(FeedDay {
            date: date.clone(),
            records,
        });
    }

    Ok(RawFeed { days })
}

fn parse_record(date: &str, item: &Value) -> Result<NeoRecord> {
    let name = item["name"]
        .as_str()
        .or_else(|| item["id"].as_str())
        .unwrap_or("")
        .to_string();

    let km = &item["estimated_diameter"]["kilometers"];
    let min = number(&km["estimated_diameter_min"], date, &name, "estimated_diameter_min")?;
    let max = number(&km["estimated_diameter_max"], date, &name, "estimated_diameter_max")?;
    let estimated_diameter_km = match (min, max) {
        (Some(min), Some(max)) => Some(DiameterRange { min, max }),
        _ => {
            warn!(date, name = %name, "Record has no kilometre diameter estimate");
            None
        }
    };

    let close_approaches = match item["close_approach_data"].as_array() {
        Some(approaches) => approaches
            .iter()
            .map(|a| {
                let km = number(
                    &a["miss_distance"]["kilometers"],
                    date,
                    &name,
                    "miss_distance.kilometers",
                )?;
                Ok(CloseApproach {
                    miss_distance_km: km.unwrap_or(0.0),
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(NeoRecord {
        name,
        estimated_diameter_km,
        close_approaches,
    })
}

/// Reads a number that the upstream may send either as a JSON number or as a
/// decimal string. `Ok(None)` means the field is absent.
fn number(value: &Value, date: &str, name: &str, field: &str) -> Result<Option<f64>> {
    let malformed = || NeoError::MalformedRecord {
        date: date.to_string(),
        name: name.to_string(),
        field: field.to_string(),
    };

    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    // NaN and infinities cannot be written back out as JSON numbers
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_feed(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(NeoError::Json(_))));
    }

    #[test]
    fn test_parse_without_near_earth_objects() {
        let result = parse_feed(br#"{"element_count": 0}"#);
        assert!(matches!(result, Err(NeoError::Json(_))));
    }

    #[test]
    fn test_parse_keeps_document_order_of_dates() {
        let body = br#"{"near_earth_objects": {
            "2025-06-03": [],
            "2025-06-01": [],
            "2025-06-02": []
        }}"#;
        let feed = parse_feed(body).unwrap();
        let dates: Vec<_> = feed.days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-03", "2025-06-01", "2025-06-02"]);
    }

    #[test]
    fn test_parse_record_with_string_distance() {
        let body = br#"{"near_earth_objects": {"2025-06-01": [{
            "name": "(2021 XY)",
            "estimated_diameter": {"kilometers": {
                "estimated_diameter_min": 0.1,
                "estimated_diameter_max": 0.3
            }},
            "close_approach_data": [
                {"miss_distance": {"kilometers": "1234.5"}},
                {"miss_distance": {"kilometers": 99.0}}
            ]
        }]}}"#;
        let feed = parse_feed(body).unwrap();
        let record = &feed.days[0].records[0];

        assert_eq!(record.name, "(2021 XY)");
        assert_eq!(
            record.estimated_diameter_km,
            Some(DiameterRange { min: 0.1, max: 0.3 })
        );
        assert_eq!(record.close_approaches.len(), 2);
        assert_eq!(record.canonical_miss_distance_km(), 1234.5);
    }

    #[test]
    fn test_parse_tolerates_missing_optional_fields() {
        let body = br#"{"near_earth_objects": {"2025-06-01": [
            {"name": "no approaches", "estimated_diameter": {"kilometers": {
                "estimated_diameter_min": 1.0, "estimated_diameter_max": 2.0}}},
            {"name": "no diameter", "close_approach_data": [{"miss_distance": {}}]}
        ]}}"#;
        let feed = parse_feed(body).unwrap();
        let records = &feed.days[0].records;

        assert!(records[0].close_approaches.is_empty());
        assert_eq!(records[0].canonical_miss_distance_km(), 0.0);
        assert_eq!(records[1].estimated_diameter_km, None);
        assert_eq!(records[1].canonical_miss_distance_km(), 0.0);
    }

    #[test]
    fn test_parse_rejects_non_finite_numbers() {
        for text in ["NaN", "inf", "-infinity"] {
            let body = format!(
                r#"{{"near_earth_objects": {{"2025-06-01": [{{
                    "name": "odd",
                    "close_approach_data": [{{"miss_distance": {{"kilometers": "{text}"}}}}]
                }}]}}}}"#
            );
            assert!(
                matches!(
                    parse_feed(body.as_bytes()),
                    Err(NeoError::MalformedRecord { .. })
                ),
                "{text} should be rejected"
            );
        }

        let body = br#"{"near_earth_objects": {"2025-06-01": [{
            "name": "odd",
            "estimated_diameter": {"kilometers": {
                "estimated_diameter_min": "inf", "estimated_diameter_max": 1.0}}
        }]}}"#;
        match parse_feed(body) {
            Err(NeoError::MalformedRecord { field, .. }) => {
                assert_eq!(field, "estimated_diameter_min");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_distance() {
        let body = br#"{"near_earth_objects": {"2025-06-01": [{
            "name": "bad",
            "close_approach_data": [{"miss_distance": {"kilometers": "far"}}]
        }]}}"#;
        match parse_feed(body) {
            Err(NeoError::MalformedRecord { date, name, field }) => {
                assert_eq!(date, "2025-06-01");
                assert_eq!(name, "bad");
                assert_eq!(field, "miss_distance.kilometers");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }
}
