//! Star map poster command line tool
//!
//! # Usage
//!
//! ```bash
//! # Render with the last saved settings, overriding date and place
//! cargo run --release --bin starmap -- render --date 2025-12-25 --lat 40.7128 --lon -74.006
//!
//! # Reproducible galaxy poster at print resolution, saved for next time
//! cargo run --release --bin starmap -- render --style galaxy --seed 7 --dpi 300 \
//!     --format jpeg --title "Our First Night" --save-settings
//!
//! # Photo and star field side by side with 20% overlap
//! cargo run --release --bin starmap -- render --photo city.jpg --orientation landscape --overlap 20
//!
//! # Captions, sidereal time and zenith for a date and place
//! cargo run --release --bin starmap -- info --date 2025-12-25 --lat "N40° 42.768′" --lon -74.006
//! ```
//!
//! Set `RUST_LOG=debug` to see render steps and `RUST_LOG=warn` for skipped
//! text layers or photos that could not be loaded.

use clap::{Args, Parser, Subcommand};
use ephemeris::{calculate_lst, format_date, format_dmm, format_hours, zenith_equatorial, Axis};
use starmap::{
    export_scene, render_poster, CompositeSource, ExportFormat, Layout, Orientation,
    PosterSettings, SettingsStorage, StarStyle, TextLayer, TextPosition,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Render star map posters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a poster to an image file
    Render(RenderArgs),

    /// Print the date caption, DMM coordinates, sidereal time and zenith
    Info {
        /// ISO date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Latitude, decimal or DMM
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude, decimal or DMM
        #[arg(long, allow_hyphen_values = true)]
        lon: String,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Settings JSON file (defaults to the last saved settings)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Poster title, used for the output filename
    #[arg(long)]
    title: Option<String>,

    /// ISO date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Latitude, decimal or DMM
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude, decimal or DMM
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<String>,

    /// Star field style
    #[arg(long, value_enum)]
    style: Option<StarStyle>,

    /// Number of regular stars
    #[arg(long, allow_hyphen_values = true)]
    stars: Option<i32>,

    /// Draw the constellation overlay
    #[arg(long)]
    constellations: bool,

    /// Seed for a reproducible star field
    #[arg(long)]
    seed: Option<u64>,

    /// Output format (inferred from --output when omitted)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output resolution in dots per inch
    #[arg(long)]
    dpi: Option<f64>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Photo to place in the circle instead of a star field
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Draw two circles along this axis
    #[arg(long, value_enum)]
    orientation: Option<Orientation>,

    /// Overlap between the two circles, in percent
    #[arg(long, default_value = "0")]
    overlap: f64,

    /// Text line below the circle (repeatable, drawn in order)
    #[arg(long = "text")]
    text: Vec<String>,

    /// Output file (defaults to {title}_{date}.{ext})
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Remember the resulting settings for the next render
    #[arg(long)]
    save_settings: bool,
}

fn base_settings(
    path: Option<&PathBuf>,
    storage: Option<&SettingsStorage>,
) -> starmap::Result<PosterSettings> {
    if let Some(path) = path {
        return PosterSettings::load_from_file(path);
    }
    match storage.and_then(|s| s.get_last_settings()) {
        Some(Ok(settings)) => Ok(settings),
        Some(Err(e)) => {
            log::warn!("Ignoring unreadable saved settings: {e}");
            Ok(PosterSettings::default())
        }
        None => Ok(PosterSettings::default()),
    }
}

fn apply_overrides(settings: &mut PosterSettings, args: &RenderArgs) {
    if let Some(title) = &args.title {
        settings.title = title.clone();
    }
    if let Some(date) = &args.date {
        settings.date = date.clone();
    }
    if let Some(lat) = &args.lat {
        settings.latitude = lat.clone();
    }
    if let Some(lon) = &args.lon {
        settings.longitude = lon.clone();
    }
    if let Some(style) = args.style {
        settings.style = style;
    }
    if let Some(stars) = args.stars {
        settings.star_options.star_count = stars;
    }
    if args.constellations {
        settings.star_options.constellations_enabled = true;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(dpi) = args.dpi {
        settings.dpi = dpi;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }

    match args.format {
        Some(format) => settings.format = format,
        None => {
            let inferred = args
                .output
                .as_ref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(ExportFormat::from_extension);
            if let Some(format) = inferred {
                settings.format = format;
            }
        }
    }

    let photo = args
        .photo
        .as_ref()
        .map(|path| CompositeSource::Photo { path: path.clone() });
    match (args.orientation, photo) {
        (Some(orientation), photo) => {
            settings.layout = Layout::Combined {
                orientation,
                overlap_percent: args.overlap,
                first: photo.unwrap_or(CompositeSource::StarField),
                second: CompositeSource::StarField,
            };
        }
        (None, Some(photo)) => settings.layout = Layout::Single { source: photo },
        (None, None) => {}
    }

    if !args.text.is_empty() {
        settings.text_layers = args
            .text
            .iter()
            .enumerate()
            .map(|(i, line)| TextLayer::new(line.clone(), TextPosition::Below, i as i32))
            .collect();
    }
}

fn render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let storage = match SettingsStorage::new() {
        Ok(storage) => Some(storage),
        Err(e) => {
            log::warn!("Settings storage unavailable: {e}");
            None
        }
    };

    let mut settings = base_settings(args.settings.as_ref(), storage.as_ref())?;
    apply_overrides(&mut settings, &args);

    let request = settings.to_render_request()?;
    let poster = render_poster(&request)?;
    for skipped in &poster.skipped_text {
        eprintln!(
            "warning: text {:?} does not fit on the canvas and was skipped",
            skipped.text
        );
    }

    let exported = export_scene(&poster.scene, &settings.export_options())?;
    let output = match &args.output {
        Some(path) => path.clone(),
        None => PathBuf::from(settings.download_filename()?),
    };
    std::fs::write(&output, &exported.bytes)?;
    println!(
        "Wrote {} ({}, {}, {} bytes)",
        output.display(),
        exported.size,
        exported.mime_type(),
        exported.bytes.len()
    );

    if args.save_settings {
        match &storage {
            Some(storage) => {
                let path = storage.save_last_settings(&settings)?;
                println!("Saved settings to {}", path.display());
            }
            None => log::warn!("Cannot save settings without a settings directory"),
        }
    }

    Ok(())
}

fn info(date: &str, lat: &str, lon: &str) -> Result<(), Box<dyn std::error::Error>> {
    let latitude = Axis::Latitude.parse(lat)?;
    let longitude = Axis::Longitude.parse(lon)?;
    let lst = calculate_lst(date, longitude)?;
    let zenith = zenith_equatorial(date, latitude, longitude)?;

    println!("Date:        {}", format_date(date)?);
    println!(
        "Coordinates: {} {}",
        format_dmm(latitude, Axis::Latitude),
        format_dmm(longitude, Axis::Longitude)
    );
    println!("LST:         {} ({lst:.6} h)", format_hours(lst));
    println!(
        "Zenith:      RA {} ({:.4}°), Dec {:+.4}°",
        format_hours(zenith.ra_hours()),
        zenith.ra_degrees,
        zenith.dec_degrees
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Info { date, lat, lon } => info(&date, &lat, &lon),
    }
}
