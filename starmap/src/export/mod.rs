//! Poster export to SVG, PNG and JPEG
//!
//! Both paths start from the same serialized SVG document: the vector export
//! returns it directly, the raster export renders it with resvg. A given
//! scene therefore looks the same in every format.

pub mod raster;
pub mod svg;

use crate::canvas_size::CanvasSize;
use crate::color::Color;
use crate::error::Result;
use crate::scene::Scene;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use svg::{escape_xml, scene_to_svg};

/// Output file formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    #[value(alias = "jpg")]
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }

    /// Guess the format from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<ExportFormat> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "svg" => Some(ExportFormat::Svg),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How to turn a scene into file bytes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Output resolution; 96 renders at canvas pixel size
    pub dpi: f64,
    /// Solid color composited under transparent pixels. JPEG exports are
    /// always flattened, over white when this is `None`.
    pub flatten: Option<Color>,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            dpi: crate::canvas_size::BASE_DPI,
            flatten: None,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_flatten(mut self, color: Color) -> Self {
        self.flatten = Some(color);
        self
    }

    fn flatten_color(&self) -> Option<Color> {
        match self.format {
            ExportFormat::Jpeg => Some(self.flatten.unwrap_or(Color::WHITE)),
            _ => self.flatten,
        }
    }
}

/// Encoded export plus the metadata needed to save or serve it
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    /// Pixel size of raster output; canvas size for SVG
    pub size: CanvasSize,
}

impl ExportedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Export a scene in the requested format
pub fn export_scene(scene: &Scene, options: &ExportOptions) -> Result<ExportedImage> {
    let document = scene_to_svg(scene);

    if options.format == ExportFormat::Svg {
        return Ok(ExportedImage {
            bytes: document.into_bytes(),
            format: ExportFormat::Svg,
            size: scene.size,
        });
    }

    let scale = CanvasSize::dpi_scale(options.dpi);
    let mut pixmap = raster::rasterize(&document, scene.size, scale)?;
    if let Some(color) = options.flatten_color() {
        pixmap = raster::flatten(&pixmap, color)?;
    }
    let image = raster::to_rgba_image(&pixmap)?;

    let bytes = match options.format {
        ExportFormat::Jpeg => raster::encode_jpeg(&image)?,
        _ => raster::encode_png(&image)?,
    };

    log::debug!(
        "Exported {} at {} dpi: {}x{}, {} bytes",
        options.format,
        options.dpi,
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(ExportedImage {
        bytes,
        format: options.format,
        size: CanvasSize::from_width_height(image.width(), image.height()),
    })
}

/// Replace runs of non-alphanumeric characters with `_`, trimmed at both
/// ends. An empty result becomes `star_map`.
pub fn sanitize_title(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            sanitized.push(c);
        } else if !sanitized.ends_with('_') {
            sanitized.push('_');
        }
    }
    let sanitized = sanitized.trim_matches('_');
    if sanitized.is_empty() {
        "star_map".to_string()
    } else {
        sanitized.to_string()
    }
}

/// `{sanitized-title}_{yyyy-mm-dd}.{ext}`
pub fn download_filename(title: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        sanitize_title(title),
        ephemeris::iso_date(date),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(
            download_filename("Our First Night!", date, ExportFormat::Png),
            "Our_First_Night_2025-12-25.png"
        );
        assert_eq!(
            download_filename("  ***  ", date, ExportFormat::Jpeg),
            "star_map_2025-12-25.jpg"
        );
        assert_eq!(
            download_filename("Été à Paris", date, ExportFormat::Svg),
            "Été_à_Paris_2025-12-25.svg"
        );
    }

    #[test]
    fn test_mime_types_and_extensions() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(ExportFormat::from_extension("JPEG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("gif"), None);
        assert_eq!(
            serde_json::from_str::<ExportFormat>("\"jpg\"").unwrap(),
            ExportFormat::Jpeg
        );
    }

    #[test]
    fn test_jpeg_always_flattens() {
        assert_eq!(
            ExportOptions::new(ExportFormat::Jpeg).flatten_color(),
            Some(Color::WHITE)
        );
        assert_eq!(ExportOptions::new(ExportFormat::Png).flatten_color(), None);
        assert_eq!(
            ExportOptions::new(ExportFormat::Png)
                .with_flatten(Color::BLACK)
                .flatten_color(),
            Some(Color::BLACK)
        );
    }
}
