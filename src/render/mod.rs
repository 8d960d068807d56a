//! Poster rasterizer.
//!
//! Draws the land-use layers and the street network onto a square tiny-skia
//! pixmap, clipped to a circle, and encodes the result as PNG. Everything
//! outside the circle stays transparent.

pub mod projection;

use crate::osm::{FeatureSets, StreetNetwork, Way};
use crate::style::{Palette, Rgb};
use projection::{view_bounds, Viewport};
use std::fmt;
use std::path::Path as FsPath;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, Shader, Stroke,
    Transform,
};

/// Output canvas edge in pixels (the original's 10in × 300dpi figure).
pub const CANVAS_SIZE: u32 = 3000;
/// Circle radius as a fraction of the canvas edge.
const CLIP_RADIUS_FRAC: f32 = 0.48;
/// Extra view extent around the data bounds, per side.
const MARGIN_FACTOR: f64 = 0.1;
/// Land-use fill opacity (0.9).
const FEATURE_ALPHA: u8 = 230;
/// Street stroke opacity (0.5).
const STREET_ALPHA: u8 = 128;
/// Palette line widths are in points; convert to pixels at 300 dpi.
const PX_PER_POINT: f32 = 300.0 / 72.0;

/// Rendering errors.
#[derive(Debug)]
pub enum RenderError {
    /// No layer had any geometry to derive view bounds from.
    NoGeometry,
    /// Pixmap or mask allocation failed.
    Canvas,
    /// PNG encode or file write failed.
    Save(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGeometry => write!(f, "No geometry available to render"),
            Self::Canvas => write!(f, "Could not allocate the render canvas"),
            Self::Save(msg) => write!(f, "Could not save the poster: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render the poster pixmap for a fetched street network and feature sets.
pub fn render_poster(
    network: &StreetNetwork,
    features: &FeatureSets,
    palette: &Palette,
) -> Result<Pixmap, RenderError> {
    let bounds = view_bounds(features, network).ok_or(RenderError::NoGeometry)?;
    let viewport = Viewport::new(&bounds, CANVAS_SIZE, MARGIN_FACTOR);

    let mut pixmap = Pixmap::new(CANVAS_SIZE, CANVAS_SIZE).ok_or(RenderError::Canvas)?;

    let center = CANVAS_SIZE as f32 / 2.0;
    let radius = CANVAS_SIZE as f32 * CLIP_RADIUS_FRAC;
    let circle = PathBuilder::from_circle(center, center, radius).ok_or(RenderError::Canvas)?;

    let mut clip = Mask::new(CANVAS_SIZE, CANVAS_SIZE).ok_or(RenderError::Canvas)?;
    clip.fill_path(&circle, FillRule::Winding, true, Transform::default());

    // Background disc; the figure around it stays transparent.
    pixmap.fill_path(
        &circle,
        &solid_paint(palette.background, 255),
        FillRule::Winding,
        Transform::default(),
        None,
    );

    fill_layer(&mut pixmap, &clip, &features.water, &viewport, palette.water);
    fill_layer(&mut pixmap, &clip, &features.parks, &viewport, palette.park);
    fill_layer(&mut pixmap, &clip, &features.buildings, &viewport, palette.building);

    stroke_streets(&mut pixmap, &clip, network, &viewport, palette);

    // node_size is zero for every palette, so no node markers are drawn.

    Ok(pixmap)
}

/// Write the pixmap to a PNG file.
pub fn save_png(pixmap: &Pixmap, path: &FsPath) -> Result<(), RenderError> {
    pixmap
        .save_png(path)
        .map_err(|e| RenderError::Save(e.to_string()))
}

fn fill_layer(pixmap: &mut Pixmap, clip: &Mask, ways: &[Way], viewport: &Viewport, color: Rgb) {
    let paint = solid_paint(color, FEATURE_ALPHA);
    for way in ways {
        // Areas come as closed rings; open fragments would fill as garbage.
        if !way.is_closed() {
            continue;
        }
        if let Some(path) = way_path(way, viewport, true) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::default(), Some(clip));
        }
    }
}

fn stroke_streets(
    pixmap: &mut Pixmap,
    clip: &Mask,
    network: &StreetNetwork,
    viewport: &Viewport,
    palette: &Palette,
) {
    let paint = solid_paint(palette.street, STREET_ALPHA);
    let stroke = Stroke {
        width: palette.edge_linewidth * PX_PER_POINT,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };

    for way in &network.ways {
        if way.points.len() < 2 {
            continue;
        }
        if let Some(path) = way_path(way, viewport, false) {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::default(), Some(clip));
        }
    }
}

fn way_path(way: &Way, viewport: &Viewport, close: bool) -> Option<Path> {
    let mut pb = PathBuilder::new();
    let mut points = way.points.iter();

    let (lon, lat) = points.next()?;
    let (x, y) = viewport.project(*lon, *lat);
    pb.move_to(x, y);

    for (lon, lat) in points {
        let (x, y) = viewport.project(*lon, *lat);
        pb.line_to(x, y);
    }

    if close {
        pb.close();
    }
    pb.finish()
}

fn solid_paint(color: Rgb, alpha: u8) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(Color::from_rgba8(color.0, color.1, color.2, alpha)),
        anti_alias: true,
        ..Default::default()
    }
}
