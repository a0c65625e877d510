//! Star map poster renderer.
//!
//! Renders keepsake posters: one or two circular composites (procedural star
//! fields or photos, clipped to circles that stay round on any canvas
//! aspect), a border, and stacked text layers with date and coordinate
//! captions. Every drawing step writes into a [`scene::Scene`] display list
//! which is exported as SVG or rasterized to PNG/JPEG.
//!
//! # Example
//!
//! ```no_run
//! use starmap::{export_scene, render_poster, ExportFormat, ExportOptions, PosterSettings};
//!
//! let settings = PosterSettings {
//!     date: "2025-12-25".to_string(),
//!     latitude: "40.7128".to_string(),
//!     longitude: "-74.0060".to_string(),
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let request = settings.to_render_request()?;
//! let poster = render_poster(&request)?;
//! let png = export_scene(&poster.scene, &ExportOptions::new(ExportFormat::Png).with_dpi(300.0))?;
//! std::fs::write(settings.download_filename()?, &png.bytes)?;
//! # Ok::<(), starmap::PosterError>(())
//! ```

pub mod canvas_size;
pub mod color;
pub mod compositor;
pub mod config_storage;
pub mod error;
pub mod export;
pub mod geometry;
pub mod poster;
pub mod request;
pub mod scene;
pub mod settings;
pub mod starfield;
pub mod text;

pub use canvas_size::CanvasSize;
pub use color::Color;
pub use config_storage::SettingsStorage;
pub use error::{PosterError, Result};
pub use export::{download_filename, export_scene, ExportFormat, ExportOptions, ExportedImage};
pub use geometry::{Circle, Orientation};
pub use poster::{render_poster, render_poster_with_rng, RenderedPoster};
pub use request::{CompositeSource, Layout, RenderRequest};
pub use settings::PosterSettings;
pub use starfield::{random_source, StarFieldOptions, StarStyle};
pub use text::{TextLayer, TextPosition};
