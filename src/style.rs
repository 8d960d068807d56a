//! Poster style palettes.
//!
//! A style maps to five colors (building, street, water, park, background)
//! plus two rendering parameters that callers can never override: the street
//! line width and the node marker size.

use serde::Deserialize;
use std::fmt;

/// An RGB color, stored as straight (non-premultiplied) channels.
pub type Rgb = (u8, u8, u8);

/// A complete rendering palette for one style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub building: Rgb,
    pub street: Rgb,
    pub water: Rgb,
    pub park: Rgb,
    pub background: Rgb,
    /// Street stroke width in point units (scaled to pixels at render time).
    pub edge_linewidth: f32,
    /// Node marker radius; zero means no markers.
    pub node_size: f32,
}

/// The fixed set of valid style names, in display order.
pub const STYLE_NAMES: &[&str] = &[
    "default", "minimal", "detailed", "retro", "modern",
    "nature", "dark", "light", "colorful", "monochrome",
];

/// Look up the palette for a style name.
pub fn palette_for(name: &str) -> Result<Palette, StyleError> {
    let p = |building, street, water, park, background, edge_linewidth| Palette {
        building,
        street,
        water,
        park,
        background,
        edge_linewidth,
        node_size: 0.0,
    };

    match name {
        "default" => Ok(p(
            (139, 115, 85), (0, 0, 0), (133, 193, 233), (144, 238, 144), (245, 245, 245), 1.0,
        )),
        "minimal" => Ok(p(
            (169, 169, 169), (105, 105, 105), (176, 224, 230), (152, 251, 152), (255, 255, 255), 0.5,
        )),
        "detailed" => Ok(p(
            (139, 69, 19), (0, 0, 0), (135, 206, 235), (144, 238, 144), (245, 222, 179), 1.5,
        )),
        "retro" => Ok(p(
            (176, 92, 74), (74, 60, 42), (127, 168, 201), (168, 184, 120), (244, 232, 208), 1.0,
        )),
        "modern" => Ok(p(
            (69, 90, 100), (55, 71, 79), (179, 229, 252), (200, 230, 201), (250, 250, 250), 1.0,
        )),
        "nature" => Ok(p(
            (121, 85, 72), (93, 64, 55), (129, 212, 250), (129, 199, 132), (241, 248, 233), 1.0,
        )),
        "dark" => Ok(p(
            (205, 133, 63), (232, 232, 232), (0, 119, 190), (45, 90, 39), (26, 26, 26), 1.0,
        )),
        "light" => Ok(p(
            (144, 164, 174), (120, 144, 156), (225, 245, 254), (232, 245, 233), (255, 255, 255), 1.0,
        )),
        "colorful" => Ok(p(
            (255, 87, 34), (121, 85, 72), (33, 150, 243), (76, 175, 80), (255, 236, 179), 1.0,
        )),
        "monochrome" => Ok(p(
            (66, 66, 66), (33, 33, 33), (158, 158, 158), (117, 117, 117), (250, 250, 250), 1.0,
        )),
        other => Err(StyleError::UnknownStyle(other.to_string())),
    }
}

/// Caller-supplied color overrides, parsed from the custom-colors JSON.
/// Unknown keys are ignored; the numeric palette parameters have no
/// corresponding fields and can never be overridden.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorOverrides {
    #[serde(default)]
    pub building_color: Option<String>,
    #[serde(default)]
    pub street_color: Option<String>,
    #[serde(default)]
    pub water_color: Option<String>,
    #[serde(default)]
    pub park_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
}

impl Palette {
    /// Apply overrides field by field. Fails on a malformed hex color.
    pub fn apply_overrides(&mut self, overrides: &ColorOverrides) -> Result<(), StyleError> {
        if let Some(hex) = &overrides.building_color {
            self.building = parse_hex(hex)?;
        }
        if let Some(hex) = &overrides.street_color {
            self.street = parse_hex(hex)?;
        }
        if let Some(hex) = &overrides.water_color {
            self.water = parse_hex(hex)?;
        }
        if let Some(hex) = &overrides.park_color {
            self.park = parse_hex(hex)?;
        }
        if let Some(hex) = &overrides.background_color {
            self.background = parse_hex(hex)?;
        }
        Ok(())
    }
}

/// Parse a `#RRGGBB` hex color.
pub fn parse_hex(s: &str) -> Result<Rgb, StyleError> {
    let hex = match s.trim().strip_prefix('#') {
        Some(h) if h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()) => h,
        _ => return Err(StyleError::BadColor(s.to_string())),
    };
    let channel = |at: usize| {
        u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| StyleError::BadColor(s.to_string()))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// Style and color errors.
#[derive(Debug)]
pub enum StyleError {
    UnknownStyle(String),
    BadColor(String),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStyle(_) => {
                write!(f, "Invalid map type. Must be one of: {}", STYLE_NAMES.join(", "))
            }
            Self::BadColor(c) => write!(f, "Invalid color '{}'. Use #RRGGBB hex format", c),
        }
    }
}

impl std::error::Error for StyleError {}
