//! File-based geocode cache at ~/.mapposter/geocache.json.
//!
//! TTL: 30 days. Keys are lowercased normalized addresses.

use super::types::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000; // 30 days in ms

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    lat: f64,
    lon: f64,
    timestamp: i64,
    #[serde(default)]
    display_name: Option<String>,
}

/// The geocode cache.
pub struct GeocodeCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl GeocodeCache {
    /// Load the cache from the default location (~/.mapposter/geocache.json).
    pub fn load() -> Self {
        let path = Self::default_path();
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    /// Load the cache from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mapposter")
            .join("geocache.json")
    }

    fn read_file(path: &PathBuf) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Look up an address. Returns None if missing or expired.
    pub fn get(&self, address: &str) -> Option<Location> {
        let entry = self.entries.get(&address.to_lowercase())?;

        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > CACHE_TTL_MS {
            return None; // expired
        }

        Some(Location {
            lat: entry.lat,
            lon: entry.lon,
            display_name: entry.display_name.clone(),
        })
    }

    /// Store a resolved location under its address key and persist to disk.
    pub fn put(&mut self, address: &str, location: &Location) {
        let entry = CacheEntry {
            lat: location.lat,
            lon: location.lon,
            timestamp: chrono::Utc::now().timestamp_millis(),
            display_name: location.display_name.clone(),
        };
        self.entries.insert(address.to_lowercase(), entry);
        self.persist();
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(&self.entries) {
            let _ = fs::write(&self.path, json);
        }
    }

    /// Number of entries (for testing).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cache() -> (GeocodeCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geocache.json");
        (GeocodeCache::load_from(path), dir)
    }

    fn cn_tower() -> Location {
        Location {
            lat: 43.6426,
            lon: -79.3871,
            display_name: Some("CN Tower, Toronto, Ontario, Canada".to_string()),
        }
    }

    #[test]
    fn test_cache_put_get() {
        let (mut cache, _dir) = test_cache();
        cache.put("290 Bremner Blvd, Toronto, ON, Canada", &cn_tower());

        let hit = cache.get("290 Bremner Blvd, Toronto, ON, Canada").unwrap();
        assert!((hit.lat - 43.6426).abs() < 1e-9);
        assert!(hit.display_name.is_some());
    }

    #[test]
    fn test_cache_case_insensitive() {
        let (mut cache, _dir) = test_cache();
        cache.put("290 Bremner Blvd, Toronto", &cn_tower());
        assert!(cache.get("290 BREMNER BLVD, TORONTO").is_some());
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.get("nowhere at all").is_none());
    }

    #[test]
    fn test_cache_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geocache.json");

        {
            let mut cache = GeocodeCache::load_from(path.clone());
            cache.put("somewhere", &cn_tower());
        }

        let cache2 = GeocodeCache::load_from(path);
        assert_eq!(cache2.len(), 1);
        assert!(cache2.get("somewhere").is_some());
    }

    #[test]
    fn test_cache_expired_entry_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geocache.json");
        let stale = r#"{
            "old address": {
                "lat": 1.0,
                "lon": 2.0,
                "timestamp": 0
            }
        }"#;
        fs::write(&path, stale).unwrap();

        let cache = GeocodeCache::load_from(path);
        assert!(cache.get("old address").is_none());
    }
}
