//! The map-generation pipeline.
//!
//! validate → geocode → fetch street network → fetch geometries → render →
//! save. Fully sequential; each stage's failure becomes one descriptive
//! top-level error. The only retry logic is the geocoder's candidate chain.

use crate::geocode::{Geocoder, GeocodeError};
use crate::osm::{self, OsmError};
use crate::render::{self, RenderError};
use crate::style::{self, ColorOverrides, StyleError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Minimum poster scale in meters.
pub const MIN_SCALE_M: f64 = 50.0;
/// Maximum poster scale in meters.
pub const MAX_SCALE_M: f64 = 1000.0;
/// Fetch box half-extent relative to the requested scale.
const FETCH_FACTOR: f64 = 1.5;

const MAX_ADDRESS_LEN: usize = 200;

/// Everything needed to produce one poster.
#[derive(Debug, Clone)]
pub struct PosterRequest {
    pub address: String,
    pub map_type: String,
    pub scale_meters: f64,
    pub custom_colors: ColorOverrides,
    pub output_path: PathBuf,
    pub nominatim_url: String,
    pub overpass_url: String,
}

/// The JSON success payload.
#[derive(Debug, Serialize)]
pub struct PosterOutput {
    pub success: bool,
    pub path: String,
}

/// Top-level pipeline errors.
#[derive(Debug)]
pub enum PosterError {
    Invalid(String),
    Style(StyleError),
    Geocode(GeocodeError),
    Osm(OsmError),
    Render(RenderError),
}

impl fmt::Display for PosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "{}", msg),
            Self::Style(e) => write!(f, "{}", e),
            Self::Geocode(e) => write!(f, "{}", e),
            Self::Osm(e) => write!(f, "{}", e),
            Self::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PosterError {}

impl From<StyleError> for PosterError {
    fn from(e: StyleError) -> Self {
        Self::Style(e)
    }
}

impl From<GeocodeError> for PosterError {
    fn from(e: GeocodeError) -> Self {
        Self::Geocode(e)
    }
}

impl From<OsmError> for PosterError {
    fn from(e: OsmError) -> Self {
        Self::Osm(e)
    }
}

impl From<RenderError> for PosterError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

/// Validate the user-facing inputs before any network work.
pub fn validate(address: &str, map_type: &str, scale_meters: f64) -> Result<(), PosterError> {
    if address.trim().is_empty() || address.len() > MAX_ADDRESS_LEN {
        return Err(PosterError::Invalid("Invalid address length".to_string()));
    }
    style::palette_for(map_type)?;
    if !(MIN_SCALE_M..=MAX_SCALE_M).contains(&scale_meters) {
        return Err(PosterError::Invalid(format!(
            "Scale must be between {} and {} meters",
            MIN_SCALE_M as i64, MAX_SCALE_M as i64
        )));
    }
    Ok(())
}

/// Run the full pipeline for one request.
pub fn generate_poster(request: &PosterRequest) -> Result<PosterOutput, PosterError> {
    validate(&request.address, &request.map_type, request.scale_meters)?;

    let mut palette = style::palette_for(&request.map_type)?;
    palette.apply_overrides(&request.custom_colors)?;

    let mut geocoder = Geocoder::new(request.nominatim_url.clone());
    let location = geocoder.resolve(&request.address)?;
    eprintln!("  location: ({:.4}, {:.4})", location.lat, location.lon);

    let dist = request.scale_meters * FETCH_FACTOR;

    let network =
        osm::overpass::fetch_street_network(&request.overpass_url, location.lat, location.lon, dist)?;
    eprintln!(
        "  street network: {} ways, {} points",
        network.ways.len(),
        network.node_count()
    );

    let features =
        osm::overpass::fetch_features(&request.overpass_url, location.lat, location.lon, dist)?;
    eprintln!(
        "  features: {} ({} water, {} parks, {} buildings)",
        features.total(),
        features.water.len(),
        features.parks.len(),
        features.buildings.len()
    );

    let pixmap = render::render_poster(&network, &features, &palette)?;
    render::save_png(&pixmap, &request.output_path)?;

    Ok(PosterOutput {
        success: true,
        path: request.output_path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(validate("290 Bremner Blvd, Toronto, ON", "default", 500.0).is_ok());
    }

    #[test]
    fn test_validate_empty_address() {
        let err = validate("", "default", 500.0).unwrap_err();
        assert_eq!(err.to_string(), "Invalid address length");
    }

    #[test]
    fn test_validate_long_address() {
        let long = "x".repeat(201);
        assert!(validate(&long, "default", 500.0).is_err());
    }

    #[test]
    fn test_validate_unknown_style() {
        let err = validate("somewhere", "neon", 500.0).unwrap_err();
        assert!(err.to_string().contains("Invalid map type"));
    }

    #[test]
    fn test_validate_scale_bounds() {
        assert!(validate("somewhere", "default", 49.9).is_err());
        assert!(validate("somewhere", "default", 1000.1).is_err());
        assert!(validate("somewhere", "default", f64::NAN).is_err());
        assert!(validate("somewhere", "default", 50.0).is_ok());
        assert!(validate("somewhere", "default", 1000.0).is_ok());
    }

    #[test]
    fn test_validate_scale_message() {
        let err = validate("somewhere", "default", 10.0).unwrap_err();
        assert_eq!(err.to_string(), "Scale must be between 50 and 1000 meters");
    }

    #[test]
    fn test_output_payload_shape() {
        let out = PosterOutput {
            success: true,
            path: "/tmp/poster.png".to_string(),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["path"], "/tmp/poster.png");
    }

    #[test]
    fn test_generate_rejects_invalid_before_network() {
        // Unroutable endpoints: reaching them would fail, but validation
        // must reject the request first.
        let request = PosterRequest {
            address: String::new(),
            map_type: "default".to_string(),
            scale_meters: 500.0,
            custom_colors: ColorOverrides::default(),
            output_path: PathBuf::from("/tmp/poster.png"),
            nominatim_url: "http://127.0.0.1:9/search".to_string(),
            overpass_url: "http://127.0.0.1:9/interpreter".to_string(),
        };
        let err = generate_poster(&request).unwrap_err();
        assert!(matches!(err, PosterError::Invalid(_)));
    }

    #[test]
    fn test_generate_rejects_bad_override_color() {
        let request = PosterRequest {
            address: "290 Bremner Blvd, Toronto, ON".to_string(),
            map_type: "default".to_string(),
            scale_meters: 500.0,
            custom_colors: ColorOverrides {
                water_color: Some("blue".to_string()),
                ..Default::default()
            },
            output_path: PathBuf::from("/tmp/poster.png"),
            nominatim_url: "http://127.0.0.1:9/search".to_string(),
            overpass_url: "http://127.0.0.1:9/interpreter".to_string(),
        };
        let err = generate_poster(&request).unwrap_err();
        assert!(matches!(err, PosterError::Style(StyleError::BadColor(_))));
    }
}
