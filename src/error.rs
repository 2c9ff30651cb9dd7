//! Error type shared by the feed client, the stores and the aggregator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NEO feed returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed record '{name}' on {date}: {field}")]
    MalformedRecord {
        date: String,
        name: String,
        field: String,
    },

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NeoError {
    /// `true` when the upstream feed could not be reached or rejected the request.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            NeoError::Http(_) | NeoError::Status { .. } | NeoError::InvalidUrl(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_fetch_error() {
        let err = NeoError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert!(err.is_fetch_error());
        assert_eq!(err.to_string(), "NEO feed returned status 429: rate limited");
    }

    #[test]
    fn test_malformed_record_is_not_fetch_error() {
        let err = NeoError::MalformedRecord {
            date: "2025-06-01".to_string(),
            name: "(2020 AB)".to_string(),
            field: "miss_distance.kilometers".to_string(),
        };
        assert!(!err.is_fetch_error());
        assert!(err.to_string().contains("(2020 AB)"));
    }
}
