use clap::Parser;
use mapposter::geocode::DEFAULT_NOMINATIM_URL;
use mapposter::osm::DEFAULT_OVERPASS_URL;
use mapposter::poster::{generate_poster, PosterRequest};
use mapposter::style::ColorOverrides;
use std::path::PathBuf;

/// mapposter — circular street-map posters from a free-form address.
///
/// Geocodes the address, downloads the surrounding street network and
/// land-use geometry from OpenStreetMap, and renders a stylized circular
/// poster PNG. On success a JSON payload goes to stdout; on failure a JSON
/// error payload goes to stderr and the exit code is 1.
///
/// Examples:
///   mapposter "290 Bremner Blvd, Toronto, ON, Canada" default 500 '{}' poster.png
///   mapposter "350 Fifth Ave, New York, NY" dark 750 '{"water_color": "#003366"}' nyc.png
#[derive(Parser)]
#[command(name = "mapposter", version, about, long_about = None)]
struct Cli {
    /// Free-form street address (US or Canadian formats work best).
    address: String,

    /// Poster style: default, minimal, detailed, retro, modern, nature,
    /// dark, light, colorful, or monochrome.
    map_type: String,

    /// Poster scale in meters (50 to 1000).
    scale_meters: f64,

    /// JSON object of color overrides, e.g. '{"park_color": "#228B22"}'.
    /// Pass '{}' for none.
    custom_colors_json: String,

    /// Output PNG path.
    output_path: PathBuf,

    /// Nominatim endpoint override (for testing against a local instance).
    #[arg(long, default_value = DEFAULT_NOMINATIM_URL)]
    nominatim_url: String,

    /// Overpass endpoint override (for testing against a local instance).
    #[arg(long, default_value = DEFAULT_OVERPASS_URL)]
    overpass_url: String,
}

fn main() {
    let cli = Cli::parse();

    let custom_colors: ColorOverrides = match serde_json::from_str(&cli.custom_colors_json) {
        Ok(overrides) => overrides,
        Err(e) => fail(&format!("Invalid custom colors JSON: {}", e)),
    };

    let request = PosterRequest {
        address: cli.address,
        map_type: cli.map_type,
        scale_meters: cli.scale_meters,
        custom_colors,
        output_path: cli.output_path,
        nominatim_url: cli.nominatim_url,
        overpass_url: cli.overpass_url,
    };

    eprintln!("  generating poster for: {}", request.address);

    match generate_poster(&request) {
        Ok(output) => {
            eprintln!("  saved: {}", output.path);
            println!("{}", serde_json::to_string(&output).unwrap());
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ! {
    eprintln!(
        "{}",
        serde_json::json!({ "success": false, "error": message })
    );
    std::process::exit(1);
}
