//! Geocoder — walks the candidate-query chain.
//!
//! Flow: cache → Nominatim per candidate query (full address, without street
//! number, city + province/state) → descriptive error.

use super::cache::GeocodeCache;
use super::providers;
use super::types::{GeocodeError, Location};
use crate::address;

/// The geocoder with its cache and endpoint.
pub struct Geocoder {
    cache: GeocodeCache,
    nominatim_url: String,
}

impl Geocoder {
    pub fn new(nominatim_url: impl Into<String>) -> Self {
        Self {
            cache: GeocodeCache::load(),
            nominatim_url: nominatim_url.into(),
        }
    }

    /// Create a geocoder with a specific cache (for testing).
    pub fn with_cache(cache: GeocodeCache, nominatim_url: impl Into<String>) -> Self {
        Self {
            cache,
            nominatim_url: nominatim_url.into(),
        }
    }

    /// Resolve a free-form address to coordinates.
    pub fn resolve(&mut self, raw_address: &str) -> Result<Location, GeocodeError> {
        let normalized = address::normalize(raw_address);

        if let Some(hit) = self.cache.get(&normalized) {
            eprintln!("  geocode cache hit: {}", normalized);
            return Ok(hit);
        }

        let candidates = address::candidate_queries(&normalized);
        if candidates.is_empty() {
            return Err(GeocodeError::Exhausted { last_error: None });
        }

        let mut last_error = None;
        for query in &candidates {
            eprintln!("  geocoding: {}", query);
            match providers::nominatim_search(&self.nominatim_url, query) {
                Ok(location) => {
                    self.cache.put(&normalized, &location);
                    return Ok(location);
                }
                Err(e) => {
                    eprintln!("  geocoding '{}' failed: {}", query, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        Err(GeocodeError::Exhausted { last_error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cached_geocoder() -> (Geocoder, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut cache = GeocodeCache::load_from(dir.path().join("geocache.json"));
        cache.put(
            "290 bremner blvd, toronto, on",
            &Location {
                lat: 43.6426,
                lon: -79.3871,
                display_name: None,
            },
        );
        // Unroutable endpoint: any network attempt fails fast.
        let geocoder = Geocoder::with_cache(cache, "http://127.0.0.1:9/search");
        (geocoder, dir)
    }

    #[test]
    fn test_resolve_cache_hit_skips_network() {
        let (mut geocoder, _dir) = cached_geocoder();
        let loc = geocoder.resolve("  290  Bremner Blvd ,, Toronto, ON ").unwrap();
        assert!((loc.lat - 43.6426).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_exhausted_on_network_failure() {
        let (mut geocoder, _dir) = cached_geocoder();
        let err = geocoder.resolve("1 Nowhere Lane, Ghost Town, ZZ").unwrap_err();
        assert!(matches!(err, GeocodeError::Exhausted { .. }));
        assert!(err.to_string().contains("Could not find this location"));
    }

    #[test]
    fn test_resolve_empty_address_errors() {
        let (mut geocoder, _dir) = cached_geocoder();
        assert!(geocoder.resolve("  ").is_err());
    }
}
