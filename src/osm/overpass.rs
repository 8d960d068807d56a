//! Overpass API client.
//!
//! Ways are requested with `out geom`, so each element carries its own
//! coordinate list and no node-joining pass is needed.

use super::types::{FeatureSets, OsmError, StreetNetwork, Way};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const USER_AGENT: &str = "mapposter/0.1 (street-map-poster-generator)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const QUERY_TIMEOUT_S: u32 = 60;

/// Meters per degree of latitude (good enough at poster scales).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// A south/west/north/east box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box of `dist_m` meters half-extent around a point, with the longitude
    /// span widened by the latitude cosine.
    pub fn around(lat: f64, lon: f64, dist_m: f64) -> Self {
        let dlat = dist_m / METERS_PER_DEGREE;
        let dlon = dist_m / (METERS_PER_DEGREE * lat.to_radians().cos().abs().max(0.01));
        Self {
            south: lat - dlat,
            west: lon - dlon,
            north: lat + dlat,
            east: lon + dlon,
        }
    }

    fn overpass_filter(&self) -> String {
        format!("({},{},{},{})", self.south, self.west, self.north, self.east)
    }
}

// ─── Response model ─────────────────────────────────────────────

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<GeomPoint>,
}

#[derive(Deserialize)]
struct GeomPoint {
    lat: f64,
    lon: f64,
}

fn ways_from_response(response: OverpassResponse) -> Vec<Way> {
    response
        .elements
        .into_iter()
        .filter(|e| e.kind == "way" && !e.geometry.is_empty())
        .map(|e| Way {
            id: e.id,
            tags: e.tags,
            points: e.geometry.into_iter().map(|p| (p.lon, p.lat)).collect(),
        })
        .collect()
}

fn run_query(overpass_url: &str, query: &str) -> Result<Vec<Way>, OsmError> {
    let response = ureq::post(overpass_url)
        .set("User-Agent", USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .send_string(query)
        .map_err(|e| OsmError::Network(e.to_string()))?;

    let parsed: OverpassResponse = response
        .into_json()
        .map_err(|e| OsmError::InvalidResponse(e.to_string()))?;

    Ok(ways_from_response(parsed))
}

/// Fetch all ways tagged `highway` within `dist_m` meters of the point.
pub fn fetch_street_network(
    overpass_url: &str,
    lat: f64,
    lon: f64,
    dist_m: f64,
) -> Result<StreetNetwork, OsmError> {
    let bbox = BoundingBox::around(lat, lon, dist_m);
    let query = street_query(&bbox);
    let network = StreetNetwork {
        ways: run_query(overpass_url, &query)?,
    };

    if network.is_empty() {
        return Err(OsmError::EmptyNetwork);
    }

    Ok(network)
}

/// Fetch land-use features within `dist_m` meters of the point and classify
/// them into water / parks / buildings.
pub fn fetch_features(
    overpass_url: &str,
    lat: f64,
    lon: f64,
    dist_m: f64,
) -> Result<FeatureSets, OsmError> {
    let bbox = BoundingBox::around(lat, lon, dist_m);
    let query = feature_query(&bbox);
    let ways = run_query(overpass_url, &query)?;
    Ok(FeatureSets::classify(ways))
}

fn street_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:{}];\nway[\"highway\"]{};\nout geom;",
        QUERY_TIMEOUT_S,
        bbox.overpass_filter(),
    )
}

fn feature_query(bbox: &BoundingBox) -> String {
    let b = bbox.overpass_filter();
    format!(
        "[out:json][timeout:{}];\n(\n  way[\"building\"]{b};\n  way[\"natural\"~\"^(water|bay)$\"]{b};\n  way[\"leisure\"~\"^(park|garden|playground|recreation_ground)$\"]{b};\n  way[\"landuse\"~\"^(grass|meadow|forest|farmland)$\"]{b};\n);\nout geom;",
        QUERY_TIMEOUT_S,
    )
}
