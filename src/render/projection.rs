//! View bounds and lon/lat → canvas pixel projection.
//!
//! The view is a local equirectangular projection around the bounds center
//! (x scaled by the cosine of the center latitude), squared to the larger
//! dimension plus a margin, so the poster is always 1:1.

use crate::osm::{FeatureSets, StreetNetwork, Way};

/// Degree-space bounds of a set of features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    pub fn from_ways(ways: &[Way]) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for (lon, lat) in ways.iter().flat_map(|w| w.points.iter()) {
            bounds = Some(match bounds {
                None => Bounds {
                    min_lon: *lon,
                    min_lat: *lat,
                    max_lon: *lon,
                    max_lat: *lat,
                },
                Some(b) => Bounds {
                    min_lon: b.min_lon.min(*lon),
                    min_lat: b.min_lat.min(*lat),
                    max_lon: b.max_lon.max(*lon),
                    max_lat: b.max_lat.max(*lat),
                },
            });
        }
        bounds
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

/// Pick the bounds layer: water, else parks, else buildings, else the
/// street network.
pub fn view_bounds(features: &FeatureSets, network: &StreetNetwork) -> Option<Bounds> {
    Bounds::from_ways(&features.water)
        .or_else(|| Bounds::from_ways(&features.parks))
        .or_else(|| Bounds::from_ways(&features.buildings))
        .or_else(|| Bounds::from_ways(&network.ways))
}

/// A square viewport mapping lon/lat to canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Longitude scale factor (cosine of the center latitude).
    lon_scale: f64,
    /// Projected x of the view's left edge.
    min_x: f64,
    /// Latitude of the view's top edge.
    max_lat: f64,
    /// Pixels per projected degree.
    px_per_deg: f64,
}

impl Viewport {
    /// Build a viewport over `bounds`, squared and padded by `margin`
    /// (fraction of the larger dimension on each side).
    pub fn new(bounds: &Bounds, size_px: u32, margin: f64) -> Self {
        let (center_lon, center_lat) = bounds.center();
        let lon_scale = center_lat.to_radians().cos().abs().max(0.01);

        let width = (bounds.max_lon - bounds.min_lon) * lon_scale;
        let height = bounds.max_lat - bounds.min_lat;
        let max_dim = width.max(height).max(1e-9);
        let half = max_dim * (0.5 + margin);

        Self {
            lon_scale,
            min_x: center_lon * lon_scale - half,
            max_lat: center_lat + half,
            px_per_deg: f64::from(size_px) / (2.0 * half),
        }
    }

    /// Project a (lon, lat) point to canvas pixels; y grows downward.
    pub fn project(&self, lon: f64, lat: f64) -> (f32, f32) {
        let x = (lon * self.lon_scale - self.min_x) * self.px_per_deg;
        let y = (self.max_lat - lat) * self.px_per_deg;
        (x as f32, y as f32)
    }
}
