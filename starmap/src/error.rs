//! Error types for poster rendering and export

use thiserror::Error;

/// Result type alias for poster operations
pub type Result<T> = std::result::Result<T, PosterError>;

/// Errors that can occur while building, rendering or exporting a poster
#[derive(Debug, Error)]
pub enum PosterError {
    /// Form input failed validation (missing/invalid date or coordinates)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Coordinate or date formatting failed
    #[error(transparent)]
    Ephemeris(#[from] ephemeris::EphemerisError),

    /// A color string could not be parsed
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// A source image could not be read or decoded
    #[error("Failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    /// The generated SVG document was rejected by the parser
    #[error("SVG parse failed: {0}")]
    Svg(#[from] usvg::Error),

    /// The raster surface could not be allocated (zero or oversized dimensions)
    #[error("Cannot allocate {width}x{height} drawing surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// PNG/JPEG encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Settings file could not be serialized or parsed
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
