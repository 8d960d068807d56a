//! Core types for the geocoding subsystem.

use std::fmt;

/// A geocoded point, validated to lie within [-90,90]×[-180,180].
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    /// Full display name from the provider, when available.
    pub display_name: Option<String>,
}

/// Whether a coordinate pair is finite and within valid geographic bounds.
pub fn coords_in_range(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Geocoding errors.
#[derive(Debug)]
pub enum GeocodeError {
    Network(String),
    InvalidResponse(String),
    /// The provider returned no match for one candidate query.
    NoMatch(String),
    /// The provider returned coordinates outside valid bounds.
    OutOfRange { lat: f64, lon: f64 },
    /// Every candidate query failed.
    Exhausted { last_error: Option<String> },
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid geocoder response: {}", msg),
            Self::NoMatch(q) => write!(f, "No geocoding match for '{}'", q),
            Self::OutOfRange { lat, lon } => {
                write!(f, "Geocoder returned out-of-range coordinates ({}, {})", lat, lon)
            }
            Self::Exhausted { last_error } => {
                write!(
                    f,
                    "Could not find this location. Please ensure the address is correct and try these formats: \
                     US addresses '1234 Street Name, City, State, USA'; \
                     Canadian addresses '1234 Street Name, City, Province, Canada'."
                )?;
                if let Some(e) = last_error {
                    write!(f, " Last error: {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GeocodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_in_range() {
        assert!(coords_in_range(0.0, 0.0));
        assert!(coords_in_range(-90.0, 180.0));
        assert!(coords_in_range(90.0, -180.0));
    }

    #[test]
    fn test_coords_out_of_range() {
        assert!(!coords_in_range(90.1, 0.0));
        assert!(!coords_in_range(0.0, -180.5));
        assert!(!coords_in_range(f64::NAN, 0.0));
        assert!(!coords_in_range(0.0, f64::INFINITY));
    }

    #[test]
    fn test_exhausted_message_includes_formats_and_last_error() {
        let err = GeocodeError::Exhausted {
            last_error: Some("timed out".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("Canadian addresses"));
        assert!(msg.contains("Last error: timed out"));
    }
}
