use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{CacheEntry, KeyValueStore};
use crate::error::{NeoError, Result};

/// Stores cache entries in a single JSON object on disk:
/// ```json
/// {
///   "neo_2025-06-01_2025-06-07_diam0_name": { "key": "...", "createdAt": "...", "views": { ... } }
/// }
/// ```
///
/// Every operation reads and rewrites the whole file, serialized by an
/// in-process lock. Writes go to a sibling `.tmp` file that is renamed over
/// the cache file. Writers that find a corrupt file start over from an empty map.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drops every entry that is no longer fresh at `now`. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let _guard = self.lock.lock().await;
        let (mut entries, reset) = self.load_or_reset().await?;
        let before = entries.len();
        entries.retain(|_, e| e.is_fresh(now));
        let removed = before - entries.len();
        if removed > 0 || reset {
            self.save(&entries).await?;
        }
        Ok(removed)
    }

    async fn load(&self) -> Result<HashMap<String, CacheEntry>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_slice(&content).map_err(|e| {
            NeoError::Cache(format!("corrupt cache file {}: {}", self.path.display(), e))
        })
    }

    /// Like [`load`](Self::load), but a corrupt file yields an empty map.
    /// The flag is `true` when that happened.
    async fn load_or_reset(&self) -> Result<(HashMap<String, CacheEntry>, bool)> {
        match self.load().await {
            Ok(entries) => Ok((entries, false)),
            Err(NeoError::Cache(reason)) => {
                warn!(path = %self.path.display(), reason = %reason, "Discarding corrupt cache file");
                Ok((HashMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, entries: &HashMap<String, CacheEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), entries = entries.len(), "Cache file written");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<()> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.load_or_reset().await?;
        entries.insert(key.to_string(), entry);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let (mut entries, reset) = self.load_or_reset().await?;
        if entries.remove(key).is_some() || reset {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{DateCount, DerivedViews};
    use chrono::TimeDelta;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn entry(key: &str, created_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry {
            key: key.to_string(),
            created_at,
            views: DerivedViews {
                counts_by_date: vec![DateCount {
                    date: "2025-06-01".to_string(),
                    count: 3,
                }],
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let path = temp_path("neo_aggregator_test_missing.json");
        let _ = std::fs::remove_file(&path);

        let store = FileStore::new(&path);
        assert!(store.get("anything").await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_entries_survive_a_new_store() {
        let path = temp_path("neo_aggregator_test_persist/cache.json");
        let _ = std::fs::remove_file(&path);

        let now = Utc::now();
        FileStore::new(&path).set("k", entry("k", now)).await.unwrap();

        let reopened = FileStore::new(&path);
        let got = reopened.get("k").await.unwrap().unwrap();
        assert_eq!(got, entry("k", now));

        reopened.remove("k").await.unwrap();
        assert!(reopened.get("k").await.unwrap().is_none());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_cache_error() {
        let path = temp_path("neo_aggregator_test_corrupt.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("k").await, Err(NeoError::Cache(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_set_replaces_corrupt_file() {
        let path = temp_path("neo_aggregator_test_corrupt_set.json");
        std::fs::write(&path, br#"{"neo_half": {"key": "neo_ha"#).unwrap();

        let now = Utc::now();
        let store = FileStore::new(&path);
        store.set("k", entry("k", now)).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(entry("k", now)));
        assert!(store.get("neo_half").await.unwrap().is_none());
        assert!(!store.tmp_path().exists());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_purge_rewrites_corrupt_file() {
        let path = temp_path("neo_aggregator_test_corrupt_purge.json");
        std::fs::write(&path, b"{\"distanceKm\": null").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 0);
        assert!(store.get("anything").await.unwrap().is_none());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_tmp_path_is_a_sibling() {
        let store = FileStore::new("/var/cache/neo/views.json");
        assert_eq!(store.tmp_path(), PathBuf::from("/var/cache/neo/views.json.tmp"));
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let path = temp_path("neo_aggregator_test_purge.json");
        let _ = std::fs::remove_file(&path);

        let now = Utc::now();
        let store = FileStore::new(&path);
        store.set("old", entry("old", now - TimeDelta::hours(2))).await.unwrap();
        store.set("new", entry("new", now)).await.unwrap();

        assert_eq!(store.purge_expired(now).await.unwrap(), 1);
        assert!(store.get("old").await.unwrap().is_none());
        assert!(store.get("new").await.unwrap().is_some());

        std::fs::remove_file(&path).unwrap();
    }
}
