//! Nominatim search provider.

use super::types::{coords_in_range, GeocodeError, Location};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

const USER_AGENT: &str = "mapposter/0.1 (street-map-poster-generator)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One result row from the Nominatim search API.
/// Nominatim serializes coordinates as strings.
#[derive(Deserialize, Debug, Clone)]
pub struct NominatimResult {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Resolve one query against Nominatim, taking the top match.
pub fn nominatim_search(base_url: &str, query: &str) -> Result<Location, GeocodeError> {
    let url = format!(
        "{}?q={}&format=json&limit=1&addressdetails=0",
        base_url,
        urlencode(query),
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .call()
        .map_err(|e| GeocodeError::Network(e.to_string()))?;

    let results: Vec<NominatimResult> = response
        .into_json()
        .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let top = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;

    location_from_result(top)
}

/// Parse and range-check a Nominatim result row.
pub fn location_from_result(result: NominatimResult) -> Result<Location, GeocodeError> {
    let lat: f64 = result
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude '{}'", result.lat)))?;
    let lon: f64 = result
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude '{}'", result.lon)))?;

    if !coords_in_range(lat, lon) {
        return Err(GeocodeError::OutOfRange { lat, lon });
    }

    Ok(Location {
        lat,
        lon,
        display_name: Some(result.display_name),
    })
}

/// Minimal percent-encoding for query parameters (no extra dep).
pub fn urlencode(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => c
                .to_string()
                .bytes()
                .map(|b| format!("%{:02X}", b))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_spaces_and_commas() {
        assert_eq!(urlencode("123 Main St, Toronto"), "123%20Main%20St%2C%20Toronto");
    }

    #[test]
    fn test_urlencode_passthrough() {
        assert_eq!(urlencode("Baker-Street_221.b~"), "Baker-Street_221.b~");
    }

    #[test]
    fn test_urlencode_multibyte() {
        assert_eq!(urlencode("ø"), "%C3%B8");
    }

    #[test]
    fn test_parse_nominatim_response() {
        let json = r#"[{
            "lat": "43.6426",
            "lon": "-79.3871",
            "display_name": "CN Tower, Toronto, Ontario, Canada",
            "importance": 0.72,
            "type": "attraction"
        }]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();
        let loc = location_from_result(results.into_iter().next().unwrap()).unwrap();
        assert!((loc.lat - 43.6426).abs() < 1e-9);
        assert!((loc.lon + 79.3871).abs() < 1e-9);
        assert_eq!(loc.display_name.as_deref(), Some("CN Tower, Toronto, Ontario, Canada"));
    }

    #[test]
    fn test_result_with_bad_latitude_rejected() {
        let result = NominatimResult {
            lat: "not-a-number".to_string(),
            lon: "0.0".to_string(),
            display_name: "x".to_string(),
        };
        assert!(matches!(
            location_from_result(result),
            Err(GeocodeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_result_out_of_range_rejected() {
        let result = NominatimResult {
            lat: "91.0".to_string(),
            lon: "10.0".to_string(),
            display_name: "x".to_string(),
        };
        assert!(matches!(
            location_from_result(result),
            Err(GeocodeError::OutOfRange { .. })
        ));
    }
}
