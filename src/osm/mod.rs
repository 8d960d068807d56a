//! OpenStreetMap data subsystem.
//!
//! Fetches the street network and land-use geometries around a point from the
//! Overpass API and classifies features into water / parks / buildings.

pub mod overpass;
pub mod types;

pub use overpass::DEFAULT_OVERPASS_URL;
pub use types::{FeatureSets, OsmError, StreetNetwork, Way};
