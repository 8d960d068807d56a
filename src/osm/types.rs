//! OSM feature types and classification.

use std::collections::HashMap;
use std::fmt;

pub type OsmId = u64;

/// A geographic point as (lon, lat).
pub type Coord = (f64, f64);

/// An OSM way with its tags and inline geometry.
#[derive(Debug, Clone, Default)]
pub struct Way {
    pub id: OsmId,
    pub tags: HashMap<String, String>,
    pub points: Vec<Coord>,
}

impl Way {
    /// Whether the way forms a closed ring.
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 4 && self.points.first() == self.points.last()
    }

    fn tag_in(&self, key: &str, values: &[&str]) -> bool {
        self.tags
            .get(key)
            .is_some_and(|v| values.contains(&v.as_str()))
    }
}

/// The fetched street network: one way per road segment.
#[derive(Debug, Clone, Default)]
pub struct StreetNetwork {
    pub ways: Vec<Way>,
}

impl StreetNetwork {
    pub fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// Total number of geometry points, used for progress reporting.
    pub fn node_count(&self) -> usize {
        self.ways.iter().map(|w| w.points.len()).sum()
    }
}

/// Tag values that classify a feature as water.
const WATER_NATURAL: &[&str] = &["water", "bay"];
/// Tag values that classify a feature as parkland.
const PARK_LEISURE: &[&str] = &["park", "garden", "playground", "recreation_ground"];
const PARK_LANDUSE: &[&str] = &["grass", "meadow", "forest", "farmland"];

/// Fetched land-use features, split into the three rendered collections.
/// A feature carrying several matching tags lands in every matching set,
/// mirroring the draw order water → parks → buildings.
#[derive(Debug, Clone, Default)]
pub struct FeatureSets {
    pub water: Vec<Way>,
    pub parks: Vec<Way>,
    pub buildings: Vec<Way>,
}

impl FeatureSets {
    /// Classify raw ways by their tags.
    pub fn classify(ways: Vec<Way>) -> Self {
        let mut sets = FeatureSets::default();
        for way in ways {
            if way.tag_in("natural", WATER_NATURAL) {
                sets.water.push(way.clone());
            }
            if way.tag_in("leisure", PARK_LEISURE) || way.tag_in("landuse", PARK_LANDUSE) {
                sets.parks.push(way.clone());
            }
            if way.tags.get("building").is_some_and(|v| !v.is_empty()) {
                sets.buildings.push(way);
            }
        }
        sets
    }

    pub fn total(&self) -> usize {
        self.water.len() + self.parks.len() + self.buildings.len()
    }
}

/// OSM fetch errors.
#[derive(Debug)]
pub enum OsmError {
    Network(String),
    InvalidResponse(String),
    EmptyNetwork,
}

impl fmt::Display for OsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid Overpass response: {}", msg),
            Self::EmptyNetwork => write!(f, "No street network found in the area"),
        }
    }
}

impl std::error::Error for OsmError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn way(tags: &[(&str, &str)], points: &[Coord]) -> Way {
        Way {
            id: 1,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            points: points.to_vec(),
        }
    }

    #[test]
    fn test_is_closed() {
        let ring = way(&[], &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(ring.is_closed());
        let open = way(&[], &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(!open.is_closed());
    }

    #[test]
    fn test_classify_water() {
        let sets = FeatureSets::classify(vec![
            way(&[("natural", "water")], &[]),
            way(&[("natural", "bay")], &[]),
            way(&[("natural", "cliff")], &[]),
        ]);
        assert_eq!(sets.water.len(), 2);
        assert_eq!(sets.total(), 2);
    }

    #[test]
    fn test_classify_parks_from_leisure_or_landuse() {
        let sets = FeatureSets::classify(vec![
            way(&[("leisure", "park")], &[]),
            way(&[("leisure", "playground")], &[]),
            way(&[("landuse", "meadow")], &[]),
            way(&[("landuse", "industrial")], &[]),
        ]);
        assert_eq!(sets.parks.len(), 3);
    }

    #[test]
    fn test_classify_buildings_any_value() {
        let sets = FeatureSets::classify(vec![
            way(&[("building", "yes")], &[]),
            way(&[("building", "church")], &[]),
            way(&[("building", "")], &[]),
        ]);
        assert_eq!(sets.buildings.len(), 2);
    }

    #[test]
    fn test_classify_multi_tag_feature_in_every_set() {
        let sets = FeatureSets::classify(vec![way(
            &[("leisure", "garden"), ("building", "greenhouse")],
            &[],
        )]);
        assert_eq!(sets.parks.len(), 1);
        assert_eq!(sets.buildings.len(), 1);
    }

    #[test]
    fn test_network_node_count() {
        let network = StreetNetwork {
            ways: vec![
                way(&[("highway", "residential")], &[(0.0, 0.0), (1.0, 1.0)]),
                way(&[("highway", "service")], &[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)]),
            ],
        };
        assert_eq!(network.node_count(), 5);
        assert!(!network.is_empty());
    }
}
