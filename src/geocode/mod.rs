//! Geocoding subsystem.
//!
//! Resolves a normalized street address to coordinates via OpenStreetMap
//! Nominatim, with a local file cache and a candidate-query fallback chain.

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod types;

pub use providers::DEFAULT_NOMINATIM_URL;
pub use resolver::Geocoder;
pub use types::{GeocodeError, Location};
