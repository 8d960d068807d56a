//! mapposter — stylized circular street-map posters from a street address.
//!
//! The whole crate is one linear pipeline: normalize the address, geocode it,
//! pull the surrounding street network and land-use geometry from OpenStreetMap,
//! and rasterize a circular poster to PNG.

pub mod address;
pub mod geocode;
pub mod osm;
pub mod poster;
pub mod render;
pub mod style;
