//! Runtime settings read from the environment (and `.env`, loaded by the binary).

use std::path::PathBuf;

use crate::infra::nasa::DEFAULT_BASE_URL;

/// NASA's shared, heavily rate-limited demo key.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub nasa_api_key: String,
    pub api_base_url: String,
    pub cache_path: PathBuf,
    pub log_file_path: PathBuf,
}

impl Config {
    /// | Variable            | Default                    |
    /// |---------------------|----------------------------|
    /// | `NASA_API_KEY`      | `DEMO_KEY`                 |
    /// | `NASA_API_BASE_URL` | `https://api.nasa.gov`     |
    /// | `NEO_CACHE_PATH`    | `.cache/neo_views.json`    |
    /// | `LOG_FILE_PATH`     | `logs/neo_aggregator.log`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            nasa_api_key: var("NASA_API_KEY", DEMO_API_KEY),
            api_base_url: var("NASA_API_BASE_URL", DEFAULT_BASE_URL),
            cache_path: var("NEO_CACHE_PATH", ".cache/neo_views.json").into(),
            log_file_path: var("LOG_FILE_PATH", "logs/neo_aggregator.log").into(),
        }
    }

    pub fn uses_demo_key(&self) -> bool {
        self.nasa_api_key == DEMO_API_KEY
    }
}
